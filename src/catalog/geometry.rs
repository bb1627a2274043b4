use serde::{Deserialize, Serialize};

/// Point on the map, both axes in percent of the map's width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkerPosition {
    pub x: f32,
    pub y: f32,
}

impl MarkerPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn in_map_bounds(&self) -> bool {
        in_percent_range(self.x) && in_percent_range(self.y)
    }
}

impl From<[f32; 2]> for MarkerPosition {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

fn in_percent_range(value: f32) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// Even-odd ray casting test. Points exactly on an edge may land either way.
pub fn polygon_contains(outline: &[MarkerPosition], point: MarkerPosition) -> bool {
    if outline.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut previous = outline[outline.len() - 1];
    for &current in outline {
        let crosses = (current.y > point.y) != (previous.y > point.y);
        if crosses {
            let x_at_y =
                current.x + (point.y - current.y) * (previous.x - current.x) / (previous.y - current.y);
            if point.x < x_at_y {
                inside = !inside;
            }
        }
        previous = current;
    }
    inside
}

/// Ear-clipping triangulation of a simple polygon, as index triples into
/// `outline`. Works for concave outlines in either winding order.
///
/// If no ear can be found (self-intersecting or zero-area outline) the rest
/// is fanned from its first vertex.
pub fn triangulate(outline: &[MarkerPosition]) -> Vec<[usize; 3]> {
    if outline.len() < 3 {
        return Vec::new();
    }
    let winding = signed_area(outline).signum();
    let mut remaining: Vec<usize> = (0..outline.len()).collect();
    let mut triangles = Vec::with_capacity(outline.len() - 2);
    while remaining.len() > 3 {
        let count = remaining.len();
        let corner = |i: usize| {
            [
                remaining[(i + count - 1) % count],
                remaining[i],
                remaining[(i + 1) % count],
            ]
        };
        let Some(ear) = (0..count).find(|&i| is_ear(outline, &remaining, corner(i), winding))
        else {
            break;
        };
        triangles.push(corner(ear));
        remaining.remove(ear);
    }
    for i in 1..remaining.len() - 1 {
        triangles.push([remaining[0], remaining[i], remaining[i + 1]]);
    }
    triangles
}

/// Twice the signed area; positive when the outline winds counter-clockwise
/// in a y-up frame.
fn signed_area(outline: &[MarkerPosition]) -> f32 {
    let mut previous = outline[outline.len() - 1];
    let mut sum = 0.0;
    for &current in outline {
        sum += previous.x * current.y - current.x * previous.y;
        previous = current;
    }
    sum
}

fn cross(a: MarkerPosition, b: MarkerPosition, c: MarkerPosition) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn is_ear(
    outline: &[MarkerPosition],
    remaining: &[usize],
    [a, b, c]: [usize; 3],
    winding: f32,
) -> bool {
    let (pa, pb, pc) = (outline[a], outline[b], outline[c]);
    if cross(pa, pb, pc) * winding <= 0.0 {
        return false;
    }
    remaining
        .iter()
        .filter(|&&i| i != a && i != b && i != c)
        .all(|&i| !triangle_contains(pa, pb, pc, outline[i]))
}

/// Edges count as inside.
fn triangle_contains(
    a: MarkerPosition,
    b: MarkerPosition,
    c: MarkerPosition,
    point: MarkerPosition,
) -> bool {
    let d1 = cross(a, b, point);
    let d2 = cross(b, c, point);
    let d3 = cross(c, a, point);
    let has_negative = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_positive = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_negative && has_positive)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<MarkerPosition> {
        vec![
            MarkerPosition::new(10.0, 10.0),
            MarkerPosition::new(50.0, 10.0),
            MarkerPosition::new(50.0, 50.0),
            MarkerPosition::new(10.0, 50.0),
        ]
    }

    #[test]
    fn contains_interior_point() {
        assert!(polygon_contains(&square(), MarkerPosition::new(30.0, 30.0)));
    }

    #[test]
    fn excludes_exterior_points() {
        assert!(!polygon_contains(&square(), MarkerPosition::new(60.0, 30.0)));
        assert!(!polygon_contains(&square(), MarkerPosition::new(30.0, 5.0)));
    }

    #[test]
    fn handles_concave_outline() {
        // L shape: the notch at the top right is outside.
        let outline = vec![
            MarkerPosition::new(0.0, 0.0),
            MarkerPosition::new(20.0, 0.0),
            MarkerPosition::new(20.0, 20.0),
            MarkerPosition::new(40.0, 20.0),
            MarkerPosition::new(40.0, 40.0),
            MarkerPosition::new(0.0, 40.0),
        ];
        assert!(polygon_contains(&outline, MarkerPosition::new(10.0, 10.0)));
        assert!(polygon_contains(&outline, MarkerPosition::new(30.0, 30.0)));
        assert!(!polygon_contains(&outline, MarkerPosition::new(30.0, 10.0)));
    }

    #[test]
    fn degenerate_outline_contains_nothing() {
        let line = vec![MarkerPosition::new(0.0, 0.0), MarkerPosition::new(10.0, 10.0)];
        assert!(!polygon_contains(&line, MarkerPosition::new(5.0, 5.0)));
    }

    #[test]
    fn bounds_check_rejects_out_of_range_and_nan() {
        assert!(MarkerPosition::new(0.0, 100.0).in_map_bounds());
        assert!(!MarkerPosition::new(-0.5, 20.0).in_map_bounds());
        assert!(!MarkerPosition::new(20.0, f32::NAN).in_map_bounds());
    }

    fn l_shape() -> Vec<MarkerPosition> {
        vec![
            MarkerPosition::new(0.0, 0.0),
            MarkerPosition::new(20.0, 0.0),
            MarkerPosition::new(20.0, 20.0),
            MarkerPosition::new(40.0, 20.0),
            MarkerPosition::new(40.0, 40.0),
            MarkerPosition::new(0.0, 40.0),
        ]
    }

    fn covered_area(outline: &[MarkerPosition], triangles: &[[usize; 3]]) -> f32 {
        triangles
            .iter()
            .map(|&[a, b, c]| cross(outline[a], outline[b], outline[c]).abs() / 2.0)
            .sum()
    }

    fn centroid(outline: &[MarkerPosition], [a, b, c]: [usize; 3]) -> MarkerPosition {
        MarkerPosition::new(
            (outline[a].x + outline[b].x + outline[c].x) / 3.0,
            (outline[a].y + outline[b].y + outline[c].y) / 3.0,
        )
    }

    #[test]
    fn concave_outline_triangles_stay_inside() {
        let outline = l_shape();
        let triangles = triangulate(&outline);
        assert_eq!(triangles.len(), outline.len() - 2);
        assert!((covered_area(&outline, &triangles) - 1200.0).abs() < 1e-3);
        for triangle in triangles {
            assert!(polygon_contains(&outline, centroid(&outline, triangle)));
        }
    }

    #[test]
    fn triangulation_ignores_winding_order() {
        let mut outline = l_shape();
        outline.reverse();
        let triangles = triangulate(&outline);
        assert_eq!(triangles.len(), 4);
        assert!((covered_area(&outline, &triangles) - 1200.0).abs() < 1e-3);
    }

    #[test]
    fn builtin_regions_triangulate_to_their_own_area() {
        let catalog = crate::catalog::Catalog::builtin().unwrap();
        for region in catalog.regions() {
            let triangles = triangulate(&region.outline);
            assert_eq!(triangles.len(), region.outline.len() - 2, "{}", region.id);
            let expected = signed_area(&region.outline).abs() / 2.0;
            let covered = covered_area(&region.outline, &triangles);
            assert!(
                (covered - expected).abs() < 1e-2,
                "{}: {} vs {}",
                region.id,
                covered,
                expected
            );
        }
    }

    #[test]
    fn too_few_points_yield_no_triangles() {
        let line = vec![MarkerPosition::new(0.0, 0.0), MarkerPosition::new(10.0, 10.0)];
        assert!(triangulate(&line).is_empty());
    }
}
