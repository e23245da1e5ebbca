use crate::error::WeldError;
use crate::mesh::Mesh;
use crate::state::{Field, SolutionState};
use vtkio::model::*;

fn point_data(name: &str, field: &Field) -> Attribute {
    Attribute::DataArray(DataArray {
        name: name.to_string(),
        elem: ElementType::Scalars {
            num_comp: 1,
            lookup_table: None,
        },
        data: IOBuffer::F64(field.as_slice().to_vec()),
    })
}

/// Write every node of the plate as a quad mesh with
/// temperature, liquid fraction and energy as point data.
pub fn write_vtk<F: AsRef<std::path::Path>>(
    mesh: &Mesh,
    state: &SolutionState,
    s: &F,
) -> Result<(), WeldError> {
    log::debug!("Writing vtk: {:?}", s.as_ref());
    let n = mesh.nodes();
    debug_assert_eq!(state.t.shape(), (n, n));

    // Node (i, j) has linear index i + n * j, the same order
    // as the column-major field storage.
    let mut points = Vec::with_capacity(3 * n * n);
    for j in 0..n {
        for i in 0..n {
            points.push(mesh.x[i]);
            points.push(mesh.y[j]);
            points.push(0.0);
        }
    }

    let n_cells = (n - 1) * (n - 1);
    let mut connectivity = Vec::with_capacity(4 * n_cells);
    let mut offsets = Vec::with_capacity(n_cells);
    let mut cell_types = Vec::with_capacity(n_cells);
    let mut offset = 4;
    let index = |i: usize, j: usize| (i + n * j) as u64;
    for j in 0..n - 1 {
        for i in 0..n - 1 {
            connectivity.push(index(i, j));
            connectivity.push(index(i + 1, j));
            connectivity.push(index(i + 1, j + 1));
            connectivity.push(index(i, j + 1));
            offsets.push(offset);
            cell_types.push(CellType::Quad);
            offset += 4;
        }
    }

    Vtk {
        version: Version::Auto,
        title: String::from("weldpool"),
        byte_order: ByteOrder::LittleEndian,
        file_path: None,
        data: DataSet::inline(UnstructuredGridPiece {
            points: IOBuffer::F64(points),
            cells: Cells {
                cell_verts: VertexNumbers::XML {
                    connectivity,
                    offsets,
                },
                types: cell_types,
            },
            data: Attributes {
                point: vec![
                    point_data("temperature", &state.t),
                    point_data("phase", &state.p),
                    point_data("enthalpy", &state.e),
                ],
                cell: vec![],
            },
        }),
    }
    .export(s)
    .map_err(|e| WeldError::Vtk(format!("{e:?}")))
}
