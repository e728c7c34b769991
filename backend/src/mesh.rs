use super::error::BackendError;
use super::glutils::*;
use super::math::*;
use gl::*;

/// The demo quad: top-right, bottom-right, bottom-left, top-left.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(
        Vec3::new(0.5, 0.5, 0.0),
        Vec4::new(1.0, 1.0, 0.0, 1.0),
        Vec2::new(1.0, 1.0),
    ),
    Vertex::new(
        Vec3::new(0.5, -0.5, 0.0),
        Vec4::new(1.0, 0.0, 1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ),
    Vertex::new(
        Vec3::new(-0.5, -0.5, 0.0),
        Vec4::new(0.0, 1.0, 1.0, 1.0),
        Vec2::new(0.0, 0.0),
    ),
    Vertex::new(
        Vec3::new(-0.5, 0.5, 0.0),
        Vec4::new(1.0, 1.0, 1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ),
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Static indexed geometry: one VAO with its VBO and EBO.
#[derive(Debug)]
pub struct Mesh {
    vao: u32,
    vbo: u32,
    ebo: u32,
    index_count: i32,
}

impl Mesh {
    pub fn quad() -> Result<Mesh, BackendError> {
        Self::upload(&QUAD_VERTICES, &QUAD_INDICES)
    }

    pub fn upload(vertices: &[Vertex], indices: &[u32]) -> Result<Mesh, BackendError> {
        let mut mesh = Mesh {
            vao: 0,
            vbo: 0,
            ebo: 0,
            index_count: indices.len() as i32,
        };

        unsafe { gl::GenVertexArrays(1, &mut mesh.vao) };
        unsafe { gl::BindVertexArray(mesh.vao) };

        unsafe { gl::GenBuffers(1, &mut mesh.vbo) };
        unsafe { gl::BindBuffer(ARRAY_BUFFER, mesh.vbo) };
        gl_buffer_data_arr_stat(vertices);

        unsafe { gl::GenBuffers(1, &mut mesh.ebo) };
        unsafe { gl::BindBuffer(ELEMENT_ARRAY_BUFFER, mesh.ebo) };
        gl_buffer_data_element_stat(indices);

        for attrib in Vertex::layout().iter() {
            gl_vertex_attrib_ptr_enab(attrib, Vertex::STRIDE);
        }
        check_gl_err()?;

        log::debug!(
            "mesh uploaded: {} vertices, {} indices (vao {})",
            vertices.len(),
            indices.len(),
            mesh.vao
        );
        Ok(mesh)
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(TRIANGLES, self.index_count, UNSIGNED_INT, std::ptr::null());
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ebo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_indices_reference_existing_vertices() {
        assert!(QUAD_INDICES
            .iter()
            .all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn quad_is_two_triangles_sharing_a_diagonal() {
        let (a, b) = QUAD_INDICES.split_at(3);
        assert_eq!(a, &[0, 1, 2]);
        assert_eq!(b, &[2, 3, 0]);
    }

    #[test]
    fn quad_uv_matches_corner() {
        for v in QUAD_VERTICES.iter() {
            assert_eq!(v.uv.x, v.position.x + 0.5);
            assert_eq!(v.uv.y, v.position.y + 0.5);
            assert_eq!(v.color.w, 1.0);
        }
    }
}
