pub(crate) mod list;
pub(crate) mod panel;
pub(crate) mod textures;
pub(crate) mod viewer;
