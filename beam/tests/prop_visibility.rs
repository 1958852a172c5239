mod common;

use beam::{BeamConfig, Visibility, VisibilityController};
use codec::{EntityIdAllocator, Packet, PacketKind, ProtocolVersion};
use common::{at, TestObserver};
use proptest::prelude::*;

proptest! {
    #[test]
    fn shown_iff_close_to_either_endpoint(
        x in -50.0f64..50.0,
        z in -50.0f64..50.0,
        radius in 1.0f64..30.0,
    ) {
        let observer = TestObserver::at(x, 64.0, z);
        let start = at(0.0, 64.0, 0.0);
        let end = at(20.0, 64.0, 0.0);
        let mut controller = VisibilityController::with_allocator(
            observer,
            start,
            end,
            &BeamConfig::default().with_viewing_radius(radius),
            &EntityIdAllocator::starting_at(1),
        )
        .unwrap();
        controller.activate().unwrap();
        controller.update();

        let position = glam::DVec3::new(x, 64.0, z);
        let r2 = radius * radius;
        let close = start.distance_squared(position) <= r2 || end.distance_squared(position) <= r2;
        prop_assert_eq!(controller.state() == Visibility::Shown, close);
    }

    #[test]
    fn every_spawn_pair_is_removed(path in proptest::collection::vec(-40.0f64..40.0, 1..20)) {
        let version = ProtocolVersion::V1_9;
        let observer = TestObserver::at(path[0], 64.0, 0.0);
        let mut controller = VisibilityController::with_allocator(
            observer.clone(),
            at(0.0, 64.0, 0.0),
            at(10.0, 64.0, 0.0),
            &BeamConfig::default().with_viewing_radius(4.0).with_protocol(version),
            &EntityIdAllocator::starting_at(1),
        )
        .unwrap();
        controller.activate().unwrap();
        for x in &path {
            observer.teleport(*x, 64.0, 0.0);
            controller.update();
        }
        controller.deactivate().unwrap();

        let kinds: Vec<PacketKind> = observer
            .take_packets(version)
            .iter()
            .map(Packet::kind)
            .collect();
        let spawns = kinds.iter().filter(|kind| **kind == PacketKind::SpawnMob).count();
        let removes = kinds.iter().filter(|kind| **kind == PacketKind::DestroyEntities).count();
        prop_assert_eq!(spawns, removes * 2);
        // Spawns always come in adjacent pairs followed by one remove.
        for window in kinds.chunks(3) {
            prop_assert_eq!(
                window,
                &[PacketKind::SpawnMob, PacketKind::SpawnMob, PacketKind::DestroyEntities][..window.len()]
            );
        }
    }
}
