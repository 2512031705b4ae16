//! Tests for widget type registration and hook dispatch through the core.

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use bramble::{
        CallbackTable, Config, Core, Error, Hook, Result,
        geom::Expanse,
        testing::{RECORDER, test_core},
    };

    #[test]
    fn callback_table_hooks_run_at_drain() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let shows = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&shows);
        core.registry_mut().add_table(
            "button",
            CallbackTable::new().with(Hook::Show, move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )?;
        let resizes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&resizes);
        core.registry_mut().set_hook("button", Hook::Resize, move |node| {
            assert_eq!(node.size(), Expanse::new(30, 10));
            counter.fetch_add(1, Ordering::SeqCst);
        })?;

        let w = core.create_widget(Some("button"))?;
        assert_eq!(core.node(w).and_then(|n| n.type_name()), Some("button"));
        core.resize(w, Expanse::new(30, 10));
        core.show(w);
        assert_eq!(shows.load(Ordering::SeqCst), 0);
        core.process_updates();
        assert_eq!(shows.load(Ordering::SeqCst), 1);
        assert_eq!(resizes.load(Ordering::SeqCst), 1);
        Ok(())
    }

    #[test]
    fn hooks_can_keep_private_data() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        core.registry_mut().add_table(
            "counter",
            CallbackTable::new()
                .with(Hook::Init, |node| node.set_data(0u32))
                .with(Hook::Update, |node| {
                    if let Some(n) = node.data_mut::<u32>() {
                        *n += 1;
                    }
                }),
        )?;
        let w = core.create_widget(Some("counter"))?;
        assert_eq!(core.data::<u32>(w), Some(&0));
        core.update(w);
        core.process_updates();
        core.update(w);
        core.process_updates();
        assert_eq!(core.data::<u32>(w), Some(&2));
        assert_eq!(core.data::<i64>(w), None);
        Ok(())
    }

    #[test]
    fn custom_types_reject_per_hook_installation() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        assert_eq!(
            core.registry_mut().set_hook(RECORDER, Hook::Draw, |_| {}),
            Err(Error::NotCallbackTable(RECORDER.into()))
        );
        assert_eq!(
            core.registry_mut().set_hook("missing", Hook::Draw, |_| {}),
            Err(Error::UnknownType("missing".into()))
        );
        assert_eq!(
            core.registry_mut().add_type(RECORDER),
            Err(Error::DuplicateType(RECORDER.into()))
        );
        Ok(())
    }

    #[test]
    fn unknown_type_leaves_tree_untouched() -> Result<()> {
        let (mut core, _) = test_core(800, 600)?;
        let existing = core.create_widget(None)?;
        assert_eq!(
            core.create_widget(Some("nope")),
            Err(Error::UnknownType("nope".into()))
        );
        assert_eq!(core.len(), 1);
        assert_eq!(core.children(core.root_id()), &[existing]);
        Ok(())
    }

    #[test]
    fn construction_requires_activation() -> Result<()> {
        let mut core = Core::new(Config::default());
        core.registry_mut().add_type("label")?;
        assert_eq!(core.create_widget(Some("label")), Err(Error::NotActive));
        core.activate();
        let w = core.create_widget(Some("label"))?;
        core.deactivate();
        assert_eq!(core.create_widget(None), Err(Error::NotActive));
        assert!(core.contains(w));
        assert_eq!(core.len(), 1);
        Ok(())
    }

    #[test]
    fn unregistered_types_fall_back_to_noops() -> Result<()> {
        let (mut core, log) = test_core(800, 600)?;
        let w = core.create_widget(Some(RECORDER))?;
        core.registry_mut().unregister(RECORDER)?;
        core.show(w);
        core.process_updates();
        assert_eq!(log.count(Hook::Show, w), 0);
        assert_eq!(log.count(Hook::Init, w), 1);
        assert!(core.node(w).is_some_and(|n| n.is_visible()));
        Ok(())
    }
}
