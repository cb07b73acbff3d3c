pub mod xdg;

pub use xdg::XdgConfigStore;
