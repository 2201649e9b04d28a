//! Integration tests for event dispatch.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glade::{
        Glade, Identity, NodeHandle, NodeSpec, Options, Registry, TimerId, Widget,
        error::{Error, Result},
        event::{
            RawEvent,
            key::{Key, KeyCode},
            mouse::Button,
        },
        geom::{Point, Rect},
        testing::{Call, Recorder, ScriptedSource},
        widgets::Container,
    };

    /// An engine where buttons, toggles and inputs record their calls.
    fn recording(options: Options) -> Result<(Glade, Recorder)> {
        let rec = Recorder::new();
        let mut registry = Registry::new();
        registry.register("container", Container)?;
        for tag in ["button", "toggle", "text_input"] {
            registry.register(tag, rec.clone())?;
        }
        Ok((Glade::with_options(options).with_registry(registry), rec))
    }

    /// A row with a 10x3 button at (1,1) and a 5x3 toggle at (12,1).
    fn bar(g: &mut Glade) -> Result<()> {
        g.frame(|b| {
            b.nest(NodeSpec::new("container").key("bar").row().gap(1), |b| {
                b.add(NodeSpec::new("button").key("b").size(10, 3))?;
                b.add(NodeSpec::new("toggle").key("t").size(5, 3))?;
                Ok(())
            })?;
            Ok(())
        })
    }

    /// Press and release the left button at a point.
    fn click(at: Point) -> [RawEvent; 2] {
        [
            RawEvent::MouseDown {
                button: Button::Left,
                location: at,
            },
            RawEvent::MouseUp {
                button: Button::Left,
                location: at,
            },
        ]
    }

    /// Identity helper.
    fn ident(path: &[&str]) -> Identity {
        Identity::from_keys(path.iter().copied())
    }

    #[test]
    fn click_routes_to_the_hit_node() -> Result<()> {
        let (mut g, rec) = recording(Options::default())?;
        bar(&mut g)?;
        let button = ident(&["bar", "b"]);
        let b = g.store().lookup(&button).expect("declared");
        assert_eq!(g.render().rect(b), Some(Rect::new(1, 1, 10, 3)));

        let mut src = ScriptedSource::new([
            RawEvent::MouseDown {
                button: Button::Left,
                location: Point::new(5, 2),
            },
            RawEvent::MouseUp {
                button: Button::Left,
                location: Point::new(5, 2),
            },
        ]);
        assert!(g.dispatch(&mut src)?);
        assert_eq!(
            rec.calls(),
            vec![Call::Click {
                identity: button.clone(),
                location: Point::new(5, 2),
                button: Button::Left,
            }]
        );
        assert_eq!(g.store().props(b)?.pressed(), Some(Button::Left));

        rec.clear();
        assert!(g.dispatch(&mut src)?);
        assert_eq!(
            rec.calls(),
            vec![Call::ClickUp {
                identity: button,
                location: Point::new(5, 2),
                button: Button::Left,
            }]
        );
        assert_eq!(g.store().props(b)?.pressed(), None);
        assert!(g.take_faults().is_empty());
        Ok(())
    }

    #[test]
    fn local_coordinates_are_relative_to_the_node() -> Result<()> {
        let (mut g, rec) = recording(Options::default())?;
        bar(&mut g)?;
        let mut src = ScriptedSource::new([RawEvent::MouseDown {
            button: Button::Middle,
            location: Point::new(16, 3),
        }]);
        g.dispatch(&mut src)?;
        assert_eq!(
            rec.calls(),
            vec![Call::Click {
                identity: ident(&["bar", "t"]),
                location: Point::new(5, 3),
                button: Button::Middle,
            }]
        );
        Ok(())
    }

    /// Takes focus on any key and records focus loss.
    struct Grab(Recorder);

    impl Widget for Grab {
        fn handle_key(&self, node: &mut NodeHandle<'_>, _key: Key, _held: bool) -> Result<()> {
            node.set_focused(true);
            Ok(())
        }

        fn handle_lost_focus(&self, node: &mut NodeHandle<'_>) -> Result<()> {
            self.0.handle_lost_focus(node)
        }
    }

    #[test]
    fn press_elsewhere_takes_focus_away() -> Result<()> {
        let rec = Recorder::new();
        let mut registry = Registry::new();
        registry.register("container", Container)?;
        registry.register("grab", Grab(rec.clone()))?;
        registry.register("text_input", rec.clone())?;
        let mut g = Glade::new().with_registry(registry);
        g.frame(|b| {
            b.nest(NodeSpec::new("container").key("bar").row().gap(1), |b| {
                b.add(NodeSpec::new("grab").key("b").size(10, 3))?;
                b.add(NodeSpec::new("grab").key("t").size(5, 3))?;
                b.add(NodeSpec::new("text_input").key("i").size(5, 3))?;
                Ok(())
            })?;
            Ok(())
        })?;
        let b = g.store().lookup(&ident(&["bar", "b"])).expect("declared");
        let t = g.store().lookup(&ident(&["bar", "t"])).expect("declared");
        let i = g.store().lookup(&ident(&["bar", "i"])).expect("declared");

        let mut src = ScriptedSource::new([
            RawEvent::KeyDown {
                key: 'f'.into(),
                held: false,
            },
            RawEvent::MouseDown {
                button: Button::Left,
                location: Point::new(19, 1),
            },
        ]);
        g.dispatch(&mut src)?;
        g.frame(|b| {
            b.nest(NodeSpec::new("container").key("bar").row().gap(1), |b| {
                b.add(NodeSpec::new("grab").key("b").size(10, 3))?;
                b.add(NodeSpec::new("grab").key("t").size(5, 3))?;
                b.add(NodeSpec::new("text_input").key("i").size(5, 3))?;
                Ok(())
            })?;
            Ok(())
        })?;
        assert!(g.store().props(b)?.focused());
        assert!(g.store().props(t)?.focused());
        rec.clear();

        g.dispatch(&mut src)?;
        assert_eq!(
            rec.calls(),
            vec![
                Call::LostFocus {
                    identity: ident(&["bar", "b"])
                },
                Call::LostFocus {
                    identity: ident(&["bar", "t"])
                },
                Call::Click {
                    identity: ident(&["bar", "i"]),
                    location: Point::new(2, 1),
                    button: Button::Left,
                },
            ]
        );
        assert!(!g.store().props(b)?.focused());
        assert!(!g.store().props(t)?.focused());
        assert_eq!(g.store().props(i)?.pressed(), Some(Button::Left));
        Ok(())
    }

    #[test]
    fn nested_hits_reach_parent_then_child() -> Result<()> {
        let rec = Recorder::new();
        let mut registry = Registry::new();
        for tag in ["container", "button", "toggle"] {
            registry.register(tag, rec.clone())?;
        }
        let mut g = Glade::new().with_registry(registry);
        bar(&mut g)?;
        let outer = g.store().lookup(&ident(&["bar"])).expect("declared");
        assert_eq!(g.render().rect(outer), Some(Rect::new(1, 1, 80, 3)));

        let mut src = ScriptedSource::new(click(Point::new(5, 2)));
        g.dispatch(&mut src)?;
        assert_eq!(
            rec.calls(),
            vec![
                Call::Click {
                    identity: ident(&["bar"]),
                    location: Point::new(5, 2),
                    button: Button::Left,
                },
                Call::Click {
                    identity: ident(&["bar", "b"]),
                    location: Point::new(5, 2),
                    button: Button::Left,
                },
            ]
        );

        rec.clear();
        g.dispatch(&mut src)?;
        let released: Vec<Identity> = rec.calls().iter().map(|c| c.identity().clone()).collect();
        assert_eq!(released, vec![ident(&["bar"]), ident(&["bar", "b"])]);
        assert!(rec.calls().iter().all(|c| matches!(c, Call::ClickUp { .. })));
        Ok(())
    }

    #[test]
    fn focused_node_with_unknown_tag_keeps_its_state() -> Result<()> {
        let rec = Recorder::new();
        let mut registry = Registry::new();
        registry.register("container", Container)?;
        registry.register("grab", Grab(rec.clone()))?;
        registry.register("text_input", rec.clone())?;
        let mut g = Glade::new().with_registry(registry);
        let row = |tag: &'static str| {
            move |b: &mut glade::Builder<'_>| -> Result<()> {
                b.nest(NodeSpec::new("container").key("bar").row().gap(1), |b| {
                    b.add(NodeSpec::new("grab").key("b").size(10, 3))?;
                    b.add(NodeSpec::new(tag).key("t").size(5, 3))?;
                    b.add(NodeSpec::new("text_input").key("i").size(5, 3))?;
                    Ok(())
                })?;
                Ok(())
            }
        };
        g.frame(row("grab"))?;
        let mut src = ScriptedSource::new([
            RawEvent::KeyDown {
                key: 'f'.into(),
                held: false,
            },
            RawEvent::MouseDown {
                button: Button::Left,
                location: Point::new(19, 1),
            },
        ]);
        g.dispatch(&mut src)?;

        // The same identity comes back under a tag nobody registered.
        g.frame(row("mystery"))?;
        let b = g.store().lookup(&ident(&["bar", "b"])).expect("declared");
        let t = g.store().lookup(&ident(&["bar", "t"])).expect("declared");
        let i = g.store().lookup(&ident(&["bar", "i"])).expect("declared");
        assert!(g.store().props(t)?.focused());
        rec.clear();

        g.dispatch(&mut src)?;
        assert_eq!(
            g.take_faults(),
            vec![Error::UnknownWidgetType("mystery".into())]
        );
        assert_eq!(
            rec.calls(),
            vec![
                Call::LostFocus {
                    identity: ident(&["bar", "b"])
                },
                Call::Click {
                    identity: ident(&["bar", "i"]),
                    location: Point::new(2, 1),
                    button: Button::Left,
                },
            ]
        );
        assert!(!g.store().props(b)?.focused());
        assert!(g.store().props(t)?.focused());
        assert_eq!(g.store().props(t)?.pressed(), None);
        assert_eq!(g.store().props(i)?.pressed(), Some(Button::Left));
        Ok(())
    }

    #[test]
    fn release_outside_reports_zero() -> Result<()> {
        let (mut g, rec) = recording(Options::default())?;
        bar(&mut g)?;
        let mut src = ScriptedSource::new([
            RawEvent::MouseDown {
                button: Button::Left,
                location: Point::new(1, 1),
            },
            RawEvent::MouseUp {
                button: Button::Left,
                location: Point::new(14, 2),
            },
        ]);
        g.dispatch(&mut src)?;
        rec.clear();
        g.dispatch(&mut src)?;
        assert_eq!(
            rec.calls(),
            vec![
                Call::ClickUp {
                    identity: ident(&["bar", "b"]),
                    location: Point::zero(),
                    button: Button::Left,
                },
                Call::ClickUp {
                    identity: ident(&["bar", "t"]),
                    location: Point::new(3, 2),
                    button: Button::Left,
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn touch_synthesizes_one_release() -> Result<()> {
        let options = Options::new().with_touch_release(Duration::from_millis(250));
        let (mut g, rec) = recording(options)?;
        bar(&mut g)?;
        let mut src = ScriptedSource::new([RawEvent::Touch {
            surface: "main".into(),
            location: Point::new(3, 3),
        }])
        .with_auto_fire();

        assert!(g.dispatch(&mut src)?);
        assert_eq!(src.timers(), &[(TimerId(1), Duration::from_millis(250))]);
        assert_eq!(g.pending_timers(), 1);
        assert_eq!(
            rec.calls(),
            vec![Call::Click {
                identity: ident(&["bar", "b"]),
                location: Point::new(3, 3),
                button: Button::Left,
            }]
        );

        rec.clear();
        assert!(g.dispatch(&mut src)?);
        assert_eq!(g.pending_timers(), 0);
        assert_eq!(
            rec.calls(),
            vec![Call::ClickUp {
                identity: ident(&["bar", "b"]),
                location: Point::new(3, 3),
                button: Button::Left,
            }]
        );

        // A second firing of the same timer is ignored.
        rec.clear();
        src.push(RawEvent::Timer(TimerId(1)));
        assert!(!g.dispatch(&mut src)?);
        assert!(rec.calls().is_empty());
        Ok(())
    }

    #[test]
    fn touch_surface_filter() -> Result<()> {
        let (mut g, rec) = recording(Options::new().with_touch_surface("panel"))?;
        bar(&mut g)?;
        let mut src = ScriptedSource::new([
            RawEvent::Touch {
                surface: "other".into(),
                location: Point::new(3, 3),
            },
            RawEvent::Touch {
                surface: "panel".into(),
                location: Point::new(13, 1),
            },
        ]);
        assert!(g.dispatch(&mut src)?);
        assert_eq!(src.timers().len(), 1);
        assert_eq!(
            rec.calls(),
            vec![Call::Click {
                identity: ident(&["bar", "t"]),
                location: Point::new(2, 1),
                button: Button::Left,
            }]
        );
        Ok(())
    }

    #[test]
    fn keys_reach_every_node_once() -> Result<()> {
        let (mut g, rec) = recording(Options::default())?;
        g.frame(|b| {
            for i in 0..4 {
                b.add(NodeSpec::new("button").key(format!("b{i}")))?;
            }
            b.nest(NodeSpec::new("container"), |b| {
                b.add(NodeSpec::new("toggle"))?;
                Ok(())
            })?;
            Ok(())
        })?;
        let mut src = ScriptedSource::new([
            RawEvent::KeyDown {
                key: KeyCode::Tab.into(),
                held: true,
            },
            RawEvent::KeyUp {
                key: KeyCode::Tab.into(),
            },
        ]);
        g.dispatch(&mut src)?;
        let calls = rec.calls();
        assert_eq!(calls.len(), 5);
        let mut seen: Vec<String> = calls.iter().map(|c| c.identity().to_string()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert!(calls.iter().all(|c| matches!(c, Call::Key { held: true, .. })));

        rec.clear();
        g.dispatch(&mut src)?;
        assert_eq!(rec.calls().len(), 5);
        assert!(rec.calls().iter().all(|c| matches!(c, Call::KeyUp { .. })));
        Ok(())
    }

    #[test]
    fn faults_are_isolated() -> Result<()> {
        let rec = Recorder::new();
        let mut registry = Registry::new();
        registry.register("good", rec.clone())?;
        registry.register("bad", Recorder::failing("boom"))?;
        let mut g = Glade::new().with_registry(registry);
        g.frame(|b| {
            b.add(NodeSpec::new("good").key("a"))?;
            b.add(NodeSpec::new("bad").key("b"))?;
            b.add(NodeSpec::new("mystery").key("c"))?;
            b.add(NodeSpec::new("good").key("d"))?;
            Ok(())
        })?;
        let mut src = ScriptedSource::new([RawEvent::KeyDown {
            key: 'q'.into(),
            held: false,
        }]);
        assert!(g.dispatch(&mut src)?);
        assert_eq!(rec.calls().len(), 2);
        assert_eq!(
            g.take_faults(),
            vec![
                Error::widget("bad", "boom"),
                Error::UnknownWidgetType("mystery".into()),
            ]
        );
        Ok(())
    }

    #[test]
    fn terminate_discards_pending_touches() -> Result<()> {
        let (mut g, rec) = recording(Options::default())?;
        bar(&mut g)?;
        let mut src = ScriptedSource::new([
            RawEvent::Touch {
                surface: "main".into(),
                location: Point::new(1, 1),
            },
            RawEvent::Terminate,
            RawEvent::Timer(TimerId(1)),
        ]);
        assert!(g.dispatch(&mut src)?);
        assert_eq!(g.pending_timers(), 1);
        rec.clear();
        assert!(!g.dispatch(&mut src)?);
        assert_eq!(g.pending_timers(), 0);
        // The late timer is unknown now and the script then terminates.
        assert!(!g.dispatch(&mut src)?);
        assert!(rec.calls().is_empty());
        Ok(())
    }
}
