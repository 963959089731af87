pub mod xonix;
