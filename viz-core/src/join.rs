//! Enter/update/exit reconciliation of keyed nodes and the animated
//! transition from one scene to the next.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::color::Color;
use crate::scene::{Node, Scene, Shape};

/// Keys split by what happened to them between two scenes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Join {
    /// Only in the new scene.
    pub enter: Vec<String>,
    /// In both scenes.
    pub update: Vec<String>,
    /// Only in the old scene.
    pub exit: Vec<String>,
}

pub fn join(old: &Scene, new: &Scene) -> Join {
    let old_keys: HashSet<&str> = old.keys().into_iter().collect();
    let new_keys: HashSet<&str> = new.keys().into_iter().collect();

    let mut result = Join::default();
    for key in new.keys() {
        if old_keys.contains(key) {
            result.update.push(key.to_owned());
        } else {
            result.enter.push(key.to_owned());
        }
    }
    result.exit = old
        .keys()
        .into_iter()
        .filter(|key| !new_keys.contains(key))
        .map(str::to_owned)
        .collect();
    result
}

/// Animates keyed shapes from their previous geometry to the target scene.
/// Entering bars grow up from their bottom edge and exiting bars turn red
/// while shrinking onto it. Other entering nodes show up at their target,
/// other exiting nodes are gone at once.
#[derive(Debug, Clone)]
pub struct Transition {
    from: HashMap<String, Shape>,
    entering: HashSet<String>,
    /// Exiting bars with the offset of their former groups.
    exiting: Vec<([f64; 2], Node)>,
    to: Scene,
    duration: Duration,
}

impl Transition {
    pub fn new(previous: Option<&Scene>, next: Scene, duration: Duration) -> Self {
        let Some(previous) = previous else {
            return Self {
                from: HashMap::new(),
                entering: HashSet::new(),
                exiting: Vec::new(),
                to: next,
                duration,
            };
        };
        let Join {
            enter,
            update,
            exit,
        } = join(previous, &next);
        log::trace!(
            "transition: {} enter, {} update, {} exit",
            enter.len(),
            update.len(),
            exit.len()
        );
        let flat = previous.flatten();
        let from = flat
            .iter()
            .filter_map(|(_, node)| Some((node.key.clone()?, node.shape.clone())))
            .collect();
        let exit: HashSet<String> = exit.into_iter().collect();
        let exiting = flat
            .into_iter()
            .filter(|(_, node)| matches!(node.shape, Shape::Rect { .. }))
            .filter(|(_, node)| node.key.as_ref().is_some_and(|key| exit.contains(key)))
            .map(|(offset, node)| (offset, node.clone()))
            .collect();
        Self {
            from,
            entering: enter.into_iter().collect(),
            exiting,
            to: next,
            duration,
        }
    }

    pub fn target(&self) -> &Scene {
        &self.to
    }

    pub fn into_target(self) -> Scene {
        self.to
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    /// The scene `elapsed` after the start of the transition.
    pub fn frame(&self, elapsed: Duration) -> Scene {
        if self.is_done(elapsed) || self.from.is_empty() {
            return self.to.clone();
        }
        let t = ease_cubic_in_out(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        let mut scene = self.to.clone();
        scene.for_each_keyed_mut(|node| {
            let Some(key) = node.key.as_ref() else {
                return;
            };
            if self.entering.contains(key) {
                node.shape = shrink_rect(&node.shape, 1.0 - t);
            } else if let Some(shape) = self
                .from
                .get(key)
                .and_then(|from| interpolate(from, &node.shape, t))
            {
                node.shape = shape;
            }
        });
        for (offset, node) in self.exiting.iter() {
            let mut node = node.clone();
            node.shape = shrink_rect(&node.shape, t);
            if let Some(fill) = node.style.fill {
                node.style.fill = Some(lerp_color(fill, Color::RED, t));
            }
            scene.push(Node::group(offset[0], offset[1], vec![node]));
        }
        scene
    }
}

/// Keeps track of what is on screen and starts a transition whenever the
/// target scene changes. A new target mid-transition starts from the frame
/// currently shown.
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    duration: Duration,
    animate: bool,
    target: Option<Scene>,
    displayed: Option<Scene>,
    running: Option<(Transition, Instant)>,
}

impl SceneAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            animate: true,
            target: None,
            displayed: None,
            running: None,
        }
    }

    pub fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
        if !animate {
            self.running = None;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Forgets the displayed scene, so the next target appears at once.
    pub fn reset(&mut self) {
        self.target = None;
        self.displayed = None;
        self.running = None;
    }

    /// The frame to draw at `now` for `target`.
    pub fn frame(&mut self, target: Scene, now: Instant) -> Scene {
        if self.target.as_ref() != Some(&target) {
            self.running = (self.animate && self.displayed.is_some()).then(|| {
                (
                    Transition::new(self.displayed.as_ref(), target.clone(), self.duration),
                    now,
                )
            });
            self.target = Some(target.clone());
        }
        let frame = match &self.running {
            Some((transition, started)) => {
                let elapsed = now.saturating_duration_since(*started);
                if transition.is_done(elapsed) {
                    None
                } else {
                    Some(transition.frame(elapsed))
                }
            }
            None => None,
        };
        let frame = frame.unwrap_or_else(|| {
            self.running = None;
            target
        });
        self.displayed = Some(frame.clone());
        frame
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(a: Color, b: Color, t: f64) -> Color {
    let channel = |a: u8, b: u8| lerp(a as f64, b as f64, t).round().clamp(0.0, 255.0) as u8;
    Color::rgb(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

/// Takes `fraction` of the height off a rect, keeping its bottom edge.
fn shrink_rect(shape: &Shape, fraction: f64) -> Shape {
    match *shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => Shape::Rect {
            x,
            y: y + height * fraction,
            width,
            height: height * (1.0 - fraction),
        },
        _ => shape.clone(),
    }
}

fn lerp2(a: [f64; 2], b: [f64; 2], t: f64) -> [f64; 2] {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t)]
}

fn lerp_points(a: &[[f64; 2]], b: &[[f64; 2]], t: f64) -> Option<Vec<[f64; 2]>> {
    (a.len() == b.len()).then(|| a.iter().zip(b).map(|(p, q)| lerp2(*p, *q, t)).collect())
}

/// Geometry between `from` and `to`; `None` if the shapes are not of the
/// same kind.
fn interpolate(from: &Shape, to: &Shape, t: f64) -> Option<Shape> {
    match (from, to) {
        (
            Shape::Circle {
                center: c0,
                radius: r0,
            },
            Shape::Circle {
                center: c1,
                radius: r1,
            },
        ) => Some(Shape::Circle {
            center: lerp2(*c0, *c1, t),
            radius: lerp(*r0, *r1, t),
        }),
        (
            Shape::Rect {
                x: x0,
                y: y0,
                width: w0,
                height: h0,
            },
            Shape::Rect {
                x: x1,
                y: y1,
                width: w1,
                height: h1,
            },
        ) => Some(Shape::Rect {
            x: lerp(*x0, *x1, t),
            y: lerp(*y0, *y1, t),
            width: lerp(*w0, *w1, t),
            height: lerp(*h0, *h1, t),
        }),
        (Shape::Line { from: a0, to: b0 }, Shape::Line { from: a1, to: b1 }) => Some(Shape::Line {
            from: lerp2(*a0, *a1, t),
            to: lerp2(*b0, *b1, t),
        }),
        (Shape::Polyline { points: p0 }, Shape::Polyline { points: p1 }) => {
            lerp_points(p0, p1, t).map(|points| Shape::Polyline { points })
        }
        (Shape::Polygon { points: p0 }, Shape::Polygon { points: p1 }) => {
            lerp_points(p0, p1, t).map(|points| Shape::Polygon { points })
        }
        (Shape::Text { pos: p0, .. }, Shape::Text { pos: p1, text, style }) => Some(Shape::Text {
            pos: lerp2(*p0, *p1, t),
            text: text.clone(),
            style: style.clone(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bubbles(items: &[(&str, f64)]) -> Scene {
        let mut scene = Scene::new(100.0, 100.0);
        for (key, x) in items {
            scene.push(Node::circle([*x, 10.0], 5.0).with_key(*key));
        }
        scene
    }

    #[test]
    fn test_join_splits_keys() {
        let old = bubbles(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]);
        let new = bubbles(&[("b", 0.0), ("d", 0.0), ("c", 0.0)]);
        let result = join(&old, &new);
        assert_eq!(result.enter, vec!["d"]);
        assert_eq!(result.update, vec!["b", "c"]);
        assert_eq!(result.exit, vec!["a"]);
    }

    #[test]
    fn test_transition_interpolates_updates_only() {
        let old = bubbles(&[("a", 0.0), ("gone", 50.0)]);
        let new = bubbles(&[("a", 100.0), ("fresh", 30.0)]);
        let transition = Transition::new(Some(&old), new.clone(), Duration::from_millis(100));

        let halfway = transition.frame(Duration::from_millis(50));
        let Shape::Circle { center, .. } = &halfway.find_key("a").unwrap().shape else {
            panic!("expected circle");
        };
        assert!((center[0] - 50.0).abs() < 1e-9);
        // Entering node sits at its target, exiting node is dropped.
        assert_eq!(halfway.find_key("fresh"), new.find_key("fresh"));
        assert!(halfway.find_key("gone").is_none());

        assert!(transition.is_done(Duration::from_millis(100)));
        assert_eq!(transition.frame(Duration::from_millis(150)), new);
    }

    fn bars(items: &[(&str, f64)]) -> Scene {
        let mut scene = Scene::new(100.0, 100.0);
        let children = items
            .iter()
            .map(|(key, x)| {
                Node::rect(*x, 20.0, 10.0, 80.0)
                    .fill(Color::SKY_BLUE)
                    .with_key(*key)
            })
            .collect();
        scene.push(Node::group(5.0, 0.0, children));
        scene
    }

    #[test]
    fn test_bars_grow_in_and_shrink_out() {
        let old = bars(&[("January", 0.0), ("February", 20.0)]);
        let new = bars(&[("January", 0.0), ("March", 40.0)]);
        let transition = Transition::new(Some(&old), new.clone(), Duration::from_millis(100));

        let halfway = transition.frame(Duration::from_millis(50));
        let Shape::Rect { y, height, .. } = halfway.find_key("March").unwrap().shape else {
            panic!("expected rect");
        };
        assert!((height - 40.0).abs() < 1e-9);
        assert!((y + height - 100.0).abs() < 1e-9);

        let exiting = halfway
            .flatten()
            .into_iter()
            .find(|(_, node)| node.key.as_deref() == Some("February"))
            .unwrap();
        assert_eq!(exiting.0, [5.0, 0.0]);
        let Shape::Rect { y, height, .. } = exiting.1.shape else {
            panic!("expected rect");
        };
        assert!((height - 40.0).abs() < 1e-9);
        assert!((y + height - 100.0).abs() < 1e-9);
        assert_ne!(exiting.1.style.fill, Some(Color::SKY_BLUE));

        let done = transition.frame(Duration::from_millis(100));
        assert_eq!(done, new);
        assert!(done.find_key("February").is_none());
    }

    #[test]
    fn test_animator_restarts_from_displayed_frame() {
        let t0 = Instant::now();
        let mut animator = SceneAnimator::new(Duration::from_millis(100));
        let first = bubbles(&[("a", 0.0)]);
        // Nothing shown yet: the first scene appears at once.
        assert_eq!(animator.frame(first.clone(), t0), first);
        assert!(!animator.is_animating());

        let second = bubbles(&[("a", 100.0)]);
        animator.frame(second.clone(), t0);
        assert!(animator.is_animating());
        let mid = animator.frame(second.clone(), t0 + Duration::from_millis(50));
        let Shape::Circle { center, .. } = &mid.find_key("a").unwrap().shape else {
            panic!("expected circle");
        };
        assert!((center[0] - 50.0).abs() < 1e-9);

        assert_eq!(
            animator.frame(second.clone(), t0 + Duration::from_millis(120)),
            second
        );
        assert!(!animator.is_animating());

        animator.set_animate(false);
        let third = bubbles(&[("a", 10.0)]);
        assert_eq!(animator.frame(third.clone(), t0 + Duration::from_millis(130)), third);
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }
}
