use gridboard_core::{BoardSpec, CellCoords};
use gridboard_lattice::{
    cell_centers, compute_spacing, extrapolate, InteriorCornerGrid, LatticeError,
};
use nalgebra::Point2;

fn reference_interior(spec: BoardSpec) -> Vec<Point2<f32>> {
    let side = spec.interior_side();
    (0..side * side)
        .map(|k| {
            let (row, col) = (k / side, k % side);
            Point2::new(100.0 + 50.0 * col as f32, 100.0 + 50.0 * row as f32)
        })
        .collect()
}

#[test]
fn fifteen_cell_board_from_perfect_interior_grid() {
    let spec = BoardSpec::default();
    let grid = InteriorCornerGrid::new(spec, reference_interior(spec)).expect("grid");

    let spacing = compute_spacing(&grid).expect("spacing");
    assert_eq!(spacing.avg_horizontal, 50.0);
    assert_eq!(spacing.avg_vertical, 50.0);

    let lattice = extrapolate(&grid, &spacing);
    assert_eq!(lattice.get(0, 0), Point2::new(50.0, 50.0));
    assert_eq!(lattice.get(0, 15), Point2::new(800.0, 50.0));
    assert_eq!(lattice.get(15, 0), Point2::new(50.0, 800.0));
    assert_eq!(lattice.get(15, 15), Point2::new(800.0, 800.0));

    let centers = cell_centers(&lattice);
    assert_eq!(centers.len(), 225);
    assert_eq!(centers.get(CellCoords::new(0, 0)), Point2::new(75.0, 75.0));
    assert_eq!(centers.get(CellCoords::new(1, 1)), Point2::new(125.0, 125.0));
    assert_eq!(centers.get(CellCoords::new(14, 14)), Point2::new(775.0, 775.0));
}

#[test]
fn interior_grid_of_wrong_board_size_is_rejected() {
    let points = reference_interior(BoardSpec::new(9).expect("spec"));
    let err = InteriorCornerGrid::new(BoardSpec::default(), points).unwrap_err();
    assert_eq!(
        err,
        LatticeError::InsufficientGrid {
            expected: 196,
            got: 64
        }
    );
}
