use anyhow::ensure;
use cgmath::{InnerSpace, Vector3, Zero};
use wgpu::util::DeviceExt;

use crate::data_structures::model::{self, ModelVertex};

/**
 * Give every vertex the average of the normals of the faces it belongs to.
 *
 * Each triangle `(i0, i1, i2)` contributes `normalize((v1 - v0) x (v2 - v0))` to
 * all three of its vertices, afterwards the sums are normalized. Existing normals
 * are discarded first.
 *
 * Degenerate triangles (a zero cross product) contribute nothing and vertices
 * that are not part of any triangle keep a zero normal. Tiny triangles are fine:
 * the cross product is rescaled before normalizing so it can't underflow. Trailing indices that don't form a full triangle
 * are ignored. An index outside of `vertices` is an error and leaves the
 * vertices untouched.
 */
pub fn calc_average_normals(vertices: &mut [ModelVertex], indices: &[u32]) -> anyhow::Result<()> {
    if let Some(bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
        anyhow::bail!(
            "index {} is out of bounds for a mesh with {} vertices",
            bad,
            vertices.len()
        );
    }

    let mut normals = vec![Vector3::zero(); vertices.len()];
    for c in indices.chunks_exact(3) {
        let pos0: Vector3<f32> = vertices[c[0] as usize].position.into();
        let pos1: Vector3<f32> = vertices[c[1] as usize].position.into();
        let pos2: Vector3<f32> = vertices[c[2] as usize].position.into();

        let Some(normal) = face_normal((pos1 - pos0).cross(pos2 - pos0)) else {
            continue;
        };
        for &i in c {
            normals[i as usize] += normal;
        }
    }

    for (vertex, normal) in vertices.iter_mut().zip(normals) {
        vertex.normal = if normal.magnitude2() > f32::EPSILON * f32::EPSILON {
            normal.normalize().into()
        } else {
            [0.0; 3]
        };
    }
    Ok(())
}

// The squared length of a cross product of short edges underflows f32 long
// before the vector itself does, so scale by the largest component first.
fn face_normal(cross: Vector3<f32>) -> Option<Vector3<f32>> {
    let largest = cross.x.abs().max(cross.y.abs()).max(cross.z.abs());
    if largest == 0.0 || !largest.is_finite() {
        return None;
    }
    Some((cross / largest).normalize())
}

/// Upload vertices and indices into a new [`model::Mesh`].
pub fn create_mesh(
    device: &wgpu::Device,
    name: &str,
    vertices: &[ModelVertex],
    indices: &[u32],
    material: Option<usize>,
) -> anyhow::Result<model::Mesh> {
    ensure!(
        indices.len() % 3 == 0,
        "mesh {name} has {} indices which is not a list of triangles",
        indices.len()
    );
    ensure!(
        indices.iter().all(|&i| (i as usize) < vertices.len()),
        "mesh {name} references vertices that don't exist"
    );

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Vertex Buffer", name)),
        contents: bytemuck::cast_slice(vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });

    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{:?} Index Buffer", name)),
        contents: bytemuck::cast_slice(indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    Ok(model::Mesh {
        name: name.to_string(),
        vertex_buffer,
        index_buffer,
        num_elements: indices.len() as u32,
        material,
    })
}

/**
 * Turn the meshes of an OBJ file into vertices.
 *
 * The demo's lighting expects normals to point into the surface, so the normals
 * of the file are flipped. Meshes without normals get averaged face normals,
 * flipped the same way. The v texture coordinate is flipped because OBJ puts
 * the origin at the bottom left.
 */
pub fn obj_vertices(mesh: &tobj::Mesh) -> anyhow::Result<Vec<ModelVertex>> {
    let mut vertices = (0..mesh.positions.len() / 3)
        .map(|i| ModelVertex {
            position: [
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            ],
            tex_coords: [
                mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                1.0 - mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
            ],
            normal: [
                mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
            ],
        })
        .collect::<Vec<_>>();

    if mesh.normals.is_empty() {
        calc_average_normals(&mut vertices, &mesh.indices)?;
    }
    for vertex in &mut vertices {
        vertex.normal = (-Vector3::from(vertex.normal)).into();
    }
    Ok(vertices)
}

/// Upload the meshes of an OBJ file. Meshes that can't be built are logged and skipped.
pub fn load_meshes(
    models: &[tobj::Model],
    file_name: &str,
    device: &wgpu::Device,
) -> Vec<model::Mesh> {
    models
        .iter()
        .enumerate()
        .filter_map(|(idx, m)| {
            let name = format!("{file_name}:{}", m.name);
            let mesh = obj_vertices(&m.mesh).and_then(|vertices| {
                create_mesh(device, &name, &vertices, &m.mesh.indices, m.mesh.material_id)
            });
            match mesh {
                Ok(mesh) => Some(mesh),
                Err(e) => {
                    log::warn!(
                        "Mesh at index {} in file {} could not be loaded: {:#}",
                        idx,
                        file_name,
                        e
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obj_normals_are_flipped_and_v_is_mirrored() {
        let mesh = tobj::Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            texcoords: vec![0.0, 0.25, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let vertices = obj_vertices(&mesh).unwrap();
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0].normal, [0.0, 0.0, -1.0]);
        assert_eq!(vertices[0].tex_coords, [0.0, 0.75]);
        assert_eq!(vertices[2].tex_coords, [0.0, 0.0]);
    }

    #[test]
    fn obj_without_normals_gets_inward_face_normals() {
        // counter clockwise seen from +z, so the outward normal is +z
        let mesh = tobj::Mesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            indices: vec![0, 1, 2],
            ..Default::default()
        };
        let vertices = obj_vertices(&mesh).unwrap();
        for vertex in vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, -1.0]);
        }
    }
}
