use super::helpers;
use wgpu;

/// Depth attachment sized to the surface's backing store.
pub(crate) struct DepthTarget {
    pub(crate) tex: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
}

impl DepthTarget {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let (tex, view) = helpers::create_depth_texture(device, "depth_tex", width, height);
        Self { tex, view }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.tex.destroy();
        (self.tex, self.view) = helpers::create_depth_texture(device, "depth_tex", width, height);
    }

    pub(crate) fn destroy(&self) {
        self.tex.destroy();
    }
}
