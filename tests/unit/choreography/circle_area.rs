use std::f64::consts::PI;

use super::*;
use crate::storyboard::model::{AnimationStep, ShapeDecl};

#[test]
fn default_board_validates() {
    let board = circle_area_storyboard(&CircleAreaParams::default()).unwrap();
    board.validate().unwrap();
    assert_eq!(board.name, "circle_area");
}

#[test]
fn declares_one_spoke_and_one_slice_per_sector() {
    let params = CircleAreaParams::default();
    let board = circle_area_storyboard(&params).unwrap();
    let spokes = board.shapes.keys().filter(|k| k.starts_with("spoke_")).count();
    let slices = board.shapes.keys().filter(|k| k.starts_with("slice_")).count();
    assert_eq!(spokes, params.sector_count);
    assert_eq!(slices, params.sector_count);
}

#[test]
fn spoke_endpoints_lie_on_the_circle() {
    let params = CircleAreaParams::default();
    let board = circle_area_storyboard(&params).unwrap();
    for (key, decl) in &board.shapes {
        if !key.starts_with("spoke_") {
            continue;
        }
        let ShapeDecl::Static(Shape::Line(line)) = decl else {
            panic!("spoke '{key}' should be a static line");
        };
        assert_eq!(line.from, Point::ORIGIN);
        let d = line.from.distance(line.to);
        assert!((d - params.radius).abs() < 1e-12, "spoke '{key}'");
    }
}

#[test]
fn slices_alternate_and_sum_to_half_circumference() {
    let params = CircleAreaParams::default();
    let board = circle_area_storyboard(&params).unwrap();
    let mut total_width = 0.0;
    for i in 0..params.sector_count {
        let key = format!("slice_{i:02}");
        let Some(ShapeDecl::Static(Shape::Rect(rect))) = board.shapes.get(&key) else {
            panic!("slice '{key}' should be a static rect");
        };
        assert_eq!(rect.flipped_v, i % 2 == 1, "slice '{key}'");
        assert_eq!(rect.height, params.radius);
        total_width += rect.width;
    }
    assert!((total_width - PI * params.radius).abs() < 1e-9);
}

#[test]
fn all_slices_morph_into_the_rectangle() {
    let params = CircleAreaParams::default();
    let board = circle_area_storyboard(&params).unwrap();
    let morph = board
        .cues
        .iter()
        .find_map(|c| match &c.step {
            AnimationStep::Transform { from, into, .. } if into == "row_rect" => {
                Some(from.clone())
            }
            _ => None,
        })
        .expect("slice morph present");
    assert_eq!(morph.len(), params.sector_count);
    assert!(morph.iter().all(|id| id.starts_with("slice_")));
}

#[test]
fn rectangle_has_half_circumference_width() {
    let params = CircleAreaParams::default();
    let board = circle_area_storyboard(&params).unwrap();
    let Some(ShapeDecl::Static(Shape::Rect(rect))) = board.shapes.get("row_rect") else {
        panic!("expected the rectangle");
    };
    assert!((rect.width - PI * params.radius).abs() < 1e-12);
    assert_eq!(rect.height, params.radius);
}

#[test]
fn odd_sector_count_is_rejected() {
    let params = CircleAreaParams {
        radius: 2.0,
        sector_count: 15,
    };
    let err = circle_area_storyboard(&params).unwrap_err();
    assert!(err.to_string().contains("even"));
}

#[test]
fn tiny_even_sector_count_is_accepted() {
    let params = CircleAreaParams {
        radius: 1.0,
        sector_count: 2,
    };
    circle_area_storyboard(&params).unwrap();
}
