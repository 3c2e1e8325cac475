//! Per-frame composition of everything visible, in screen space

use macroquad::math::Vec2;
use crate::world::{Point, PolyLine, Viewport};
use super::EditSession;

/// Drawable geometry for one frame, screen space
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub polylines: Vec<Vec<Vec2>>,
    pub markers: Vec<Vec2>,
    pub spawn: Option<Vec2>,
}

fn to_screen(viewport: &Viewport, point: Point) -> Vec2 {
    let (x, y) = viewport.to_screen(point);
    Vec2::new(x, y)
}

/// Base geometry, then this session's, then the stroke in progress.
/// Polylines with fewer than two vertices are left out.
pub fn compose(session: &EditSession) -> Scene {
    let viewport = session.viewport();
    let base = session.base();

    let polylines: Vec<Vec<Vec2>> = base
        .lines
        .iter()
        .chain(session.pending_lines())
        .chain(session.stroke())
        .filter(|line| line.is_drawable())
        .map(|line: &PolyLine| {
            line.vertices()
                .iter()
                .map(|v| to_screen(&viewport, *v))
                .collect::<Vec<_>>()
        })
        .collect();

    let markers: Vec<Vec2> = base
        .markers
        .iter()
        .chain(session.pending_markers())
        .map(|m| to_screen(&viewport, m.position))
        .collect();

    Scene {
        polylines,
        markers,
        spawn: session
            .effective_spawn()
            .map(|s| to_screen(&viewport, s.position)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Level, Marker, Spawn};

    #[test]
    fn test_empty_session_composes_empty_scene() {
        let session = EditSession::new(Level::new(), Viewport::default());
        assert_eq!(compose(&session), Scene::default());
    }

    #[test]
    fn test_compose_order_and_screen_space() {
        let base = Level {
            lines: vec![PolyLine::from_vertices(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).unwrap()],
            markers: vec![Marker::new(Point::new(-10.0, 0.0))],
            spawn: Some(Spawn::new(Point::new(0.0, 100.0))),
        };
        let mut session = EditSession::new(base, Viewport::default());
        session.begin_stroke(Point::new(100.0, 0.0));
        session.extend_stroke(Point::new(100.0, -50.0));
        session.end_stroke();
        session.place_marker(Point::new(20.0, 0.0));
        session.begin_stroke(Point::new(-100.0, 0.0));
        session.extend_stroke(Point::new(-200.0, 0.0));

        let scene = compose(&session);
        assert_eq!(
            scene.polylines,
            vec![
                vec![Vec2::new(640.0, 360.0), Vec2::new(650.0, 350.0)],
                vec![Vec2::new(740.0, 360.0), Vec2::new(740.0, 410.0)],
                vec![Vec2::new(540.0, 360.0), Vec2::new(440.0, 360.0)],
            ]
        );
        assert_eq!(scene.markers, vec![Vec2::new(630.0, 360.0), Vec2::new(660.0, 360.0)]);
        assert_eq!(scene.spawn, Some(Vec2::new(640.0, 260.0)));
    }

    #[test]
    fn test_stubs_are_not_drawn() {
        let mut session = EditSession::new(Level::new(), Viewport::default());
        session.begin_stroke(Point::new(0.0, 0.0));
        session.end_stroke();
        session.begin_stroke(Point::new(5.0, 5.0));

        let scene = compose(&session);
        assert!(scene.polylines.is_empty());
        assert_eq!(session.pending_lines().len(), 1);
    }

    #[test]
    fn test_session_spawn_overrides_base() {
        let base = Level {
            spawn: Some(Spawn::new(Point::new(0.0, 0.0))),
            ..Level::new()
        };
        let mut session = EditSession::new(base, Viewport::default());
        session.place_spawn(Point::new(60.0, 0.0));
        assert_eq!(compose(&session).spawn, Some(Vec2::new(700.0, 360.0)));
    }
}
