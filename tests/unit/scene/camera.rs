use super::*;

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn container_camera_maps_corners_to_ndc() {
    let cam = OrthoCamera::for_container(ContainerSize::new(800.0, 600.0));
    assert_eq!((cam.left, cam.right, cam.top, cam.bottom), (-400.0, 400.0, 300.0, -300.0));

    let p = cam.projection();
    assert!(close(p * Point::new(400.0, 300.0), Point::new(1.0, 1.0)));
    assert!(close(p * Point::new(-400.0, -300.0), Point::new(-1.0, -1.0)));
    assert!(close(p * Point::ORIGIN, Point::ORIGIN));
}

#[test]
fn world_to_pixel_puts_top_left_at_origin() {
    let cam = OrthoCamera::for_container(ContainerSize::new(800.0, 600.0));
    let size = Size::new(800, 600).unwrap();
    let m = cam.world_to_pixel(size);
    assert!(close(m * Point::new(-400.0, 300.0), Point::new(0.0, 0.0)));
    assert!(close(m * Point::new(400.0, -300.0), Point::new(800.0, 600.0)));

    let centre = cam.unproject_pixel_centre(size, 0, 0);
    assert!(close(centre, Point::new(-399.5, 299.5)));
}

#[test]
fn fit_container_updates_projection() {
    let mut cam = OrthoCamera::for_container(ContainerSize::new(800.0, 600.0));
    cam.fit_container(ContainerSize::new(400.0, 300.0));
    assert_eq!(cam, OrthoCamera::for_container(ContainerSize::new(400.0, 300.0)));
    assert!(close(cam.projection() * Point::new(200.0, 150.0), Point::new(1.0, 1.0)));
}

#[test]
fn degenerate_bounds_keep_previous_projection() {
    let mut cam = OrthoCamera::for_container(ContainerSize::new(10.0, 10.0));
    let before = cam.projection();
    cam.left = 3.0;
    cam.right = 3.0;
    cam.update_projection();
    assert_eq!(cam.projection(), before);
}
