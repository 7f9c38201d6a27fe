pub mod media;
pub mod reactor;
pub mod settings;
pub mod slide;
pub mod sync;
pub mod ticker;

pub use reactor::Reactor;
pub use settings::ChannelConfig;
