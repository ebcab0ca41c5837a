// Scripted in-memory backend shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use halo_core::scene::SceneContent;
use halo_core::{
    DisposalError, DrawStats, FrameDraw, RenderBackend, RenderError, ResizeError, ResourceHandle,
    ResourceId, ResourceKind, SurfaceInitError, ViewportState,
};

#[derive(Default)]
pub struct MockBackend {
    pub uploads: Cell<u32>,
    pub draws: Cell<u32>,
    pub resizes: RefCell<Vec<(u32, u32)>>,
    pub releases: RefCell<Vec<ResourceHandle>>,
    pub fail_draws: Cell<u32>,
    pub fail_release_kind: Cell<Option<ResourceKind>>,
    pub fail_upload: Cell<bool>,
    pub max_dimension: Cell<Option<u32>>,
    pub heap_bytes: Cell<Option<u64>>,
    pub last_elapsed_ms: Cell<f32>,
    pub last_particle_count: Cell<u32>,
    mesh_triangles: RefCell<Vec<u64>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release_count(&self) -> usize {
        self.releases.borrow().len()
    }
}

impl RenderBackend for MockBackend {
    fn upload(&mut self, scene: &SceneContent) -> Result<Vec<ResourceHandle>, SurfaceInitError> {
        self.uploads.set(self.uploads.get() + 1);
        if self.fail_upload.get() {
            return Err(SurfaceInitError::Upload {
                label: "mock".into(),
                reason: "scripted failure".into(),
            });
        }
        let mut handles = Vec::new();
        let mut next = 0u32;
        let mut push = |kind: ResourceKind, label: &str| {
            handles.push(ResourceHandle {
                id: ResourceId(next),
                kind,
                label: label.to_string(),
            });
            next += 1;
        };
        for shader in scene.shaders() {
            push(ResourceKind::Shader, shader.label);
        }
        let mut tris = self.mesh_triangles.borrow_mut();
        for mesh in scene.meshes() {
            push(ResourceKind::Geometry, mesh.label);
            push(ResourceKind::Material, mesh.label);
            tris.push(mesh.geometry.triangle_count());
        }
        push(ResourceKind::ParticleBuffer, "particles");
        push(ResourceKind::Context, "context");
        Ok(handles)
    }

    fn resize(&mut self, viewport: &ViewportState) -> Result<(), ResizeError> {
        let (w, h) = (viewport.pixel_width(), viewport.pixel_height());
        if let Some(max) = self.max_dimension.get() {
            if w > max || h > max {
                return Err(ResizeError::ExceedsLimit {
                    width: w,
                    height: h,
                    max,
                });
            }
        }
        self.resizes.borrow_mut().push((w, h));
        Ok(())
    }

    fn draw(&mut self, frame: &FrameDraw<'_>) -> Result<DrawStats, RenderError> {
        self.draws.set(self.draws.get() + 1);
        self.last_elapsed_ms.set(frame.elapsed_ms);
        self.last_particle_count.set(frame.particle_count);
        if self.fail_draws.get() > 0 {
            self.fail_draws.set(self.fail_draws.get() - 1);
            return Err(RenderError::SurfaceLost);
        }
        let tris = self.mesh_triangles.borrow();
        let triangles = frame
            .items
            .iter()
            .map(|item| tris[item.mesh.index()])
            .sum::<u64>()
            + frame.particle_count as u64 * 2;
        Ok(DrawStats {
            draw_calls: frame.items.len() as u32 + 1,
            triangles,
        })
    }

    fn release(&mut self, handle: &ResourceHandle) -> Result<(), DisposalError> {
        self.releases.borrow_mut().push(handle.clone());
        if self.fail_release_kind.get() == Some(handle.kind) {
            return Err(DisposalError::Backend {
                label: handle.label.clone(),
                reason: "scripted failure".into(),
            });
        }
        Ok(())
    }

    fn heap_used_bytes(&self) -> Option<u64> {
        self.heap_bytes.get()
    }
}

pub fn viewport() -> ViewportState {
    ViewportState::new(1280, 720, 1.0).expect("valid viewport")
}

pub fn running_engine() -> halo_core::Engine<MockBackend> {
    let mut engine = halo_core::Engine::new(MockBackend::new(), viewport(), 42);
    engine.start().expect("mock upload succeeds");
    engine
}
