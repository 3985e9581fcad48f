use crate::types::{Triangle, Uv};

/// Split the rectangle `u_range × v_range` into `res_u × res_v` cells and each
/// cell into two triangles.
///
/// Cells are visited with `i` (along U) in the outer loop and `j` (along V) in
/// the inner loop; the lower-left triangle of a cell precedes the upper-right one.
pub fn create_regular_triangulation(
    res_u: usize,
    res_v: usize,
    u_range: (f64, f64),
    v_range: (f64, f64),
) -> Vec<Triangle> {
    let (u_min, u_max) = u_range;
    let (v_min, v_max) = v_range;
    let du = (u_max - u_min) / res_u as f64;
    let dv = (v_max - v_min) / res_v as f64;

    let mut triangles = Vec::with_capacity(2 * res_u * res_v);
    for i in 0..res_u {
        for j in 0..res_v {
            let u0 = u_min + i as f64 * du;
            let u1 = u_min + (i + 1) as f64 * du;
            let v0 = v_min + j as f64 * dv;
            let v1 = v_min + (j + 1) as f64 * dv;

            triangles.push(Triangle::new(
                Uv::new(u0, v0),
                Uv::new(u1, v0),
                Uv::new(u0, v1),
            ));
            triangles.push(Triangle::new(
                Uv::new(u1, v0),
                Uv::new(u1, v1),
                Uv::new(u0, v1),
            ));
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::create_regular_triangulation;
    use crate::types::Uv;

    #[test]
    fn produces_two_triangles_per_cell() {
        let triangles = create_regular_triangulation(25, 15, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(triangles.len(), 2 * 25 * 15);
    }

    #[test]
    fn iterates_v_fastest() {
        let triangles = create_regular_triangulation(2, 3, (0.0, 1.0), (0.0, 1.0));
        assert_eq!(triangles[0].vertices[0], Uv::new(0.0, 0.0));
        // Second cell of the first column starts one V step up.
        let second_cell = &triangles[2];
        assert_eq!(second_cell.vertices[0].x, 0.0);
        assert!((second_cell.vertices[0].y - 1.0 / 3.0).abs() < 1e-12);
        // Second column begins after res_v cells.
        assert_eq!(triangles[6].vertices[0].x, 0.5);
    }

    #[test]
    fn cell_split_matches_corner_layout() {
        let triangles = create_regular_triangulation(1, 1, (0.0, 1.0), (-0.3, 0.3));
        let lower = triangles[0].vertices;
        let upper = triangles[1].vertices;
        assert_eq!(lower, [Uv::new(0.0, -0.3), Uv::new(1.0, -0.3), Uv::new(0.0, 0.3)]);
        assert_eq!(upper, [Uv::new(1.0, -0.3), Uv::new(1.0, 0.3), Uv::new(0.0, 0.3)]);
    }

    #[test]
    fn covers_domain_area() {
        let triangles = create_regular_triangulation(4, 5, (0.0, 1.0), (-0.3, 0.3));
        let area: f64 = triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.vertices;
                ((b - a).perp(&(c - a))).abs() * 0.5
            })
            .sum();
        assert!((area - 0.6).abs() < 1e-12);
    }
}
