pub mod tdsim_vis2d;
pub mod tdsim_vis3d;
