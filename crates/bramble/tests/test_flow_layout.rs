//! Tests for flow layout of static and relative widgets.

#[cfg(test)]
mod tests {
    use bramble::{
        Core, NodeId, PositionMode, Result,
        geom::{Edges, Expanse, Point},
        testing::{init_tracing, test_core},
    };

    fn flowed(core: &mut Core, container: NodeId, w: i32, h: i32) -> Result<NodeId> {
        let id = core.create_widget(None)?;
        core.attach(id, Some(container))?;
        core.set_position_mode(id, PositionMode::Static);
        core.resize(id, Expanse::new(w, h));
        core.show(id);
        Ok(id)
    }

    fn pos(core: &Core, id: NodeId) -> Option<Point> {
        core.node(id).map(|n| n.pos())
    }

    #[test]
    fn wraps_into_second_row() -> Result<()> {
        init_tracing();
        let (mut core, _) = test_core(1200, 800)?;
        let container = core.create_widget(None)?;
        core.resize(container, Expanse::new(1000, 600));
        core.show(container);
        let w1 = flowed(&mut core, container, 400, 50)?;
        let w2 = flowed(&mut core, container, 400, 50)?;
        let w3 = flowed(&mut core, container, 400, 50)?;
        core.process_updates();

        assert_eq!(pos(&core, w1), Some(Point::new(0, 0)));
        assert_eq!(pos(&core, w2), Some(Point::new(400, 0)));
        assert_eq!(pos(&core, w3), Some(Point::new(0, 50)));
        Ok(())
    }

    #[test]
    fn padding_narrows_rows() -> Result<()> {
        init_tracing();
        let (mut core, _) = test_core(1200, 800)?;
        let container = core.create_widget(None)?;
        core.resize(container, Expanse::new(1000, 600));
        core.set_padding(container, Edges::new(0, 100, 0, 100));
        let w1 = flowed(&mut core, container, 400, 50)?;
        let w2 = flowed(&mut core, container, 400, 50)?;
        core.process_updates();

        assert_eq!(pos(&core, w1), Some(Point::new(0, 0)));
        assert_eq!(pos(&core, w2), Some(Point::new(400, 0)));

        core.set_padding(container, Edges::new(0, 150, 0, 100));
        core.process_updates();
        assert_eq!(pos(&core, w2), Some(Point::new(0, 50)));
        Ok(())
    }

    #[test]
    fn hiding_reflows_siblings() -> Result<()> {
        init_tracing();
        let (mut core, _) = test_core(1200, 800)?;
        let container = core.create_widget(None)?;
        core.resize(container, Expanse::new(1000, 600));
        let w1 = flowed(&mut core, container, 400, 50)?;
        let w2 = flowed(&mut core, container, 400, 50)?;
        let w3 = flowed(&mut core, container, 400, 50)?;
        core.process_updates();
        assert_eq!(pos(&core, w3), Some(Point::new(0, 50)));

        core.hide(w2);
        core.process_updates();
        assert_eq!(pos(&core, w1), Some(Point::new(0, 0)));
        assert_eq!(pos(&core, w3), Some(Point::new(400, 0)));
        Ok(())
    }

    #[test]
    fn relative_widgets_keep_their_offset() -> Result<()> {
        init_tracing();
        let (mut core, _) = test_core(1200, 800)?;
        let container = core.create_widget(None)?;
        core.resize(container, Expanse::new(1000, 600));
        let w1 = flowed(&mut core, container, 100, 20)?;
        let w2 = flowed(&mut core, container, 100, 20)?;
        core.set_position_mode(w2, PositionMode::Relative);
        core.set_offset(w2, Point::new(5, 7));
        core.process_updates();

        assert_eq!(pos(&core, w1), Some(Point::new(0, 0)));
        assert_eq!(pos(&core, w2), Some(Point::new(105, 7)));
        Ok(())
    }

    #[test]
    fn absolute_widgets_are_not_flowed() -> Result<()> {
        init_tracing();
        let (mut core, _) = test_core(1200, 800)?;
        let container = core.create_widget(None)?;
        core.resize(container, Expanse::new(1000, 600));
        let w1 = flowed(&mut core, container, 100, 20)?;
        let abs = core.create_widget(None)?;
        core.attach(abs, Some(container))?;
        core.resize(abs, Expanse::new(100, 20));
        core.move_to(abs, Point::new(500, 500));
        core.show(abs);
        let w2 = flowed(&mut core, container, 100, 20)?;
        core.process_updates();

        assert_eq!(pos(&core, w2), Some(Point::new(100, 0)));
        assert_eq!(pos(&core, abs), Some(Point::new(500, 500)));

        core.set_position_mode(w1, PositionMode::Absolute);
        core.move_to(w1, Point::new(300, 300));
        core.process_updates();
        assert_eq!(pos(&core, w1), Some(Point::new(300, 300)));
        assert_eq!(pos(&core, w2), Some(Point::new(0, 0)));
        Ok(())
    }
}
