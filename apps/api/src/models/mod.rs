pub mod fact;
pub mod preset;

pub use fact::Fact;
pub use preset::Preset;
