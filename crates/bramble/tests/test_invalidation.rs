//! Tests for dirty rectangles and their propagation to the root.

#[cfg(test)]
mod tests {
    use bramble::{
        Core, NodeId, Result,
        geom::{Edges, Expanse, Point, Rect},
        testing::test_core,
    };

    /// An outer widget at (100, 100) with 10px padding, holding an inner
    /// widget at (20, 20). Both visible, with all pending damage collected.
    fn nested() -> Result<(Core, NodeId, NodeId)> {
        let (mut core, _) = test_core(800, 600)?;
        let outer = core.create_widget(None)?;
        let inner = core.create_widget(None)?;
        core.attach(inner, Some(outer))?;
        core.set_padding(outer, Edges::all(10));
        core.resize(outer, Expanse::new(300, 300));
        core.move_to(outer, Point::new(100, 100));
        core.resize(inner, Expanse::new(50, 50));
        core.move_to(inner, Point::new(20, 20));
        core.show(outer);
        core.show(inner);
        core.process_updates();
        core.propagate();
        core.take_dirty();
        core.take_needs_sync();
        Ok((core, outer, inner))
    }

    #[test]
    fn nested_rects_reach_root_in_screen_space() -> Result<()> {
        let (core, _, inner) = nested()?;
        assert!(core.mark_dirty(inner, Rect::new(0, 0, 10, 10)));
        assert!(core.take_needs_sync());
        core.propagate();
        assert_eq!(core.take_dirty(), vec![Rect::new(130, 130, 10, 10)]);
        assert!(core.take_dirty().is_empty());
        Ok(())
    }

    #[test]
    fn rects_are_clipped_to_the_widget() -> Result<()> {
        let (core, _, inner) = nested()?;
        assert!(core.mark_dirty(inner, Rect::new(40, 40, 100, 100)));
        assert!(!core.mark_dirty(inner, Rect::new(60, 60, 5, 5)));
        assert!(!core.mark_dirty(inner, Rect::new(0, 0, 0, 10)));
        core.propagate();
        assert_eq!(core.take_dirty(), vec![Rect::new(170, 170, 10, 10)]);
        Ok(())
    }

    #[test]
    fn hidden_subtrees_do_not_propagate() -> Result<()> {
        let (mut core, outer, inner) = nested()?;
        core.hide(outer);
        core.process_updates();
        core.propagate();
        assert_eq!(core.take_dirty(), vec![Rect::new(100, 100, 300, 300)]);
        core.take_needs_sync();

        assert!(core.mark_dirty(inner, Rect::new(0, 0, 10, 10)));
        assert!(!core.take_needs_sync());
        core.propagate();
        assert!(core.take_dirty().is_empty());
        Ok(())
    }

    #[test]
    fn moving_dirties_old_and_new_areas() -> Result<()> {
        let (mut core, outer, _) = nested()?;
        core.move_to(outer, Point::new(0, 0));
        core.process_updates();
        assert!(core.take_needs_sync());
        core.propagate();
        assert_eq!(
            core.take_dirty(),
            vec![Rect::new(100, 100, 300, 300), Rect::new(0, 0, 300, 300)]
        );
        Ok(())
    }

    #[test]
    fn remote_rects_are_clipped_on_propagation() -> Result<()> {
        let (core, _, inner) = nested()?;
        let remote = core.remote(inner);
        assert!(remote.is_some());
        if let Some(remote) = remote {
            remote.mark_dirty(Rect::new(45, 45, 20, 20));
        }
        assert!(core.take_needs_sync());
        core.propagate();
        assert_eq!(core.take_dirty(), vec![Rect::new(175, 175, 5, 5)]);
        Ok(())
    }
}
