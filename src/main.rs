use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use xonix_core::{Direction, Game, XonixConfig, XonixGame};

/// Headless demo runner: drives the simulation at its tick cadence with
/// a random-walk pilot and logs the round status once per second.
/// `RUST_LOG` tunes verbosity as usual.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("xonix_core=debug".parse().unwrap()),
        )
        .init();

    let config = XonixConfig::default();
    let dt = config.tick_duration().as_secs_f32();
    let ticks_per_second = config.tick_rate_hz as u64;
    let mut game = XonixGame::with_config(config);
    let mut rng = StdRng::from_entropy();

    tracing::info!(
        "Simulation started: {:?} field, {} lives",
        game.field_dimensions(),
        game.lives()
    );

    let mut interval = tokio::time::interval(game.tick_rate());
    loop {
        interval.tick().await;

        if game.is_game_over() {
            tracing::info!(
                "Final: level {}, {}% of the last field captured",
                game.level(),
                game.capture_percent()
            );
            break;
        }

        // Drunken pilot: re-roll the heading every half second or so
        if game.current_tick() % (ticks_per_second / 2).max(1) == 0 {
            let direction = match rng.gen_range(0..4) {
                0 => Direction::Up,
                1 => Direction::Down,
                2 => Direction::Left,
                _ => Direction::Right,
            };
            game.request_direction(direction);
        }

        game.tick(dt);

        if game.current_tick() % ticks_per_second == 0 {
            tracing::info!(
                "t={}s lives={} level={} captured={}% state={:?}",
                game.remaining_seconds(),
                game.lives(),
                game.level(),
                game.capture_percent(),
                game.round_state()
            );
        }
    }
}
