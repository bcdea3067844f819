pub(crate) mod compositor;
pub(crate) mod layer;
pub(crate) mod model;
pub(crate) mod recipe;
