pub mod adhd;
pub mod anxiety;
pub mod bipolar;
pub mod depression;
pub mod mythomania;
pub mod narcissism;
