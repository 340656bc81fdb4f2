use uuid::Uuid;

use crate::Transform;

mod handle_queue;
use handle_queue::HandleQueue;
mod forward;
pub use forward::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshID(u32);
impl From<usize> for MeshID { fn from(value: usize) -> Self { MeshID(value as u32) }}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchID(u32);
impl From<usize> for BatchID { fn from(value: usize) -> Self { BatchID(value as u32) }}

/// Per-mesh draw state for a static mesh added with [`Renderer::add_mesh`].
#[derive(Clone, Copy, Debug)]
pub struct MeshRenderer {
    pub enabled: bool,
    pub transform: Transform,
    pub alpha: f32,
    id: Uuid
}

impl MeshRenderer {
    pub(crate) fn new(uuid: Uuid) -> Self {
        MeshRenderer {
            enabled: true,
            transform: Transform::new(),
            alpha: 1.0,
            id: uuid
        }
    }

    pub(crate) fn get_id(&self) -> Uuid {
        self.id
    }
}
