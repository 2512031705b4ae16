//! Property tests for size and position bounds.

#[cfg(test)]
mod tests {
    use bramble::{
        Length, Result,
        geom::{Expanse, Point},
        testing::test_core,
    };
    use proptest::prelude::*;

    #[test]
    fn percentage_bounds_follow_the_container() -> Result<()> {
        let (mut core, _) = test_core(1000, 800)?;
        let w = core.create_widget(None)?;
        core.set_min_size(w, Some(Length::percent(10.0)), None);
        core.set_max_size(w, Some(Length::percent(20.0)), Some(Length::Px(50)));
        core.resize(w, Expanse::new(900, 900));
        core.process_updates();
        assert_eq!(core.node(w).map(|n| n.size()), Some(Expanse::new(200, 50)));

        core.set_screen_size(Expanse::new(500, 800));
        core.process_updates();
        assert_eq!(core.node(w).map(|n| n.size()), Some(Expanse::new(100, 50)));
        Ok(())
    }

    proptest! {
        #[test]
        fn size_stays_within_limits(
            min_w in -50i32..200,
            min_h in -50i32..200,
            max_w in 0i32..300,
            max_h in 0i32..300,
            w in 1i32..500,
            h in 1i32..500,
        ) {
            let (mut core, _) = test_core(1000, 800)?;
            let id = core.create_widget(None)?;
            core.limit_size(id, Expanse::new(min_w, min_h), Expanse::new(max_w, max_h));
            core.resize(id, Expanse::new(w, h));
            core.process_updates();

            let node = core.node(id).ok_or_else(|| TestCaseError::fail("widget missing"))?;
            let limits = node.limits();
            let size = node.size();
            prop_assert_eq!(limits.min_size, Expanse::new(min_w.max(0), min_h.max(0)));
            prop_assert!(limits.max_size.w >= limits.min_size.w);
            prop_assert!(limits.max_size.h >= limits.min_size.h);
            prop_assert!(size.w >= limits.min_size.w && size.w <= limits.max_size.w);
            prop_assert!(size.h >= limits.min_size.h && size.h <= limits.max_size.h);
        }

        #[test]
        fn position_stays_within_limits(
            min_x in -50i32..200,
            max_x in 0i32..300,
            x in -100i32..500,
            y in -100i32..500,
        ) {
            let (mut core, _) = test_core(1000, 800)?;
            let id = core.create_widget(None)?;
            core.resize(id, Expanse::new(10, 10));
            core.limit_pos(id, Point::new(min_x, 0), Point::new(max_x, 100));
            core.move_to(id, Point::new(x, y));
            core.process_updates();

            let node = core.node(id).ok_or_else(|| TestCaseError::fail("widget missing"))?;
            let limits = node.limits();
            let pos = node.pos();
            prop_assert!(limits.min_pos.x >= 0);
            prop_assert!(limits.max_pos.x >= limits.min_pos.x);
            prop_assert!(pos.x >= limits.min_pos.x && pos.x <= limits.max_pos.x);
            prop_assert!((0..=100).contains(&pos.y));
        }
    }
}
