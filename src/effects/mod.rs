pub(crate) mod displacement;
pub(crate) mod texture;
