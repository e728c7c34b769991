use std::mem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3 { x, y, z }
    }
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Vec4 { x, y, z, w }
    }

    #[inline(always)]
    pub fn as_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

/// Interleaved vertex as it sits in the VBO: position, RGBA color, texture
/// coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec4,
    pub uv: Vec2,
}

/// Description of one vertex attribute, in floats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AttribLayout {
    pub index: u32,
    pub size: u32,
    pub offset: usize,
}

impl Vertex {
    pub const fn new(position: Vec3, color: Vec4, uv: Vec2) -> Self {
        Vertex {
            position,
            color,
            uv,
        }
    }

    /// Number of floats per vertex.
    pub const STRIDE: u32 = (mem::size_of::<Vertex>() / mem::size_of::<f32>()) as u32;

    /// Attribute locations 0 (position), 1 (color), 2 (uv).
    pub fn layout() -> [AttribLayout; 3] {
        let f = mem::size_of::<f32>();
        [
            AttribLayout {
                index: 0,
                size: 3,
                offset: mem::offset_of!(Vertex, position) / f,
            },
            AttribLayout {
                index: 1,
                size: 4,
                offset: mem::offset_of!(Vertex, color) / f,
            },
            AttribLayout {
                index: 2,
                size: 2,
                offset: mem::offset_of!(Vertex, uv) / f,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_nine_packed_floats() {
        assert_eq!(mem::size_of::<Vertex>(), 9 * mem::size_of::<f32>());
        assert_eq!(Vertex::STRIDE, 9);
    }

    #[test]
    fn layout_offsets_follow_fields() {
        let l = Vertex::layout();
        assert_eq!(l[0], AttribLayout { index: 0, size: 3, offset: 0 });
        assert_eq!(l[1], AttribLayout { index: 1, size: 4, offset: 3 });
        assert_eq!(l[2], AttribLayout { index: 2, size: 2, offset: 7 });
    }

    #[test]
    fn layout_covers_whole_stride() {
        let total: u32 = Vertex::layout().iter().map(|a| a.size).sum();
        assert_eq!(total, Vertex::STRIDE);
    }

    #[test]
    fn vec4_as_array() {
        assert_eq!(Vec4::new(1.0, 2.0, 3.0, 4.0).as_array(), [1.0, 2.0, 3.0, 4.0]);
    }
}
