pub(crate) mod blend;
pub(crate) mod config;
pub(crate) mod effect;
pub(crate) mod events;
