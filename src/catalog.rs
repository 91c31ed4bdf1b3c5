//! Built-in list of Alice & Bob local emulator targets.

use crate::capability::{Capabilities, NoiseProfile};
use crate::provider::BackendDescriptor;

/// Backend used by a device when no name is given.
pub const DEFAULT_BACKEND: &str = "EMU:6Q:PHYSICAL_CATS";

/// The local emulator catalog, in lookup order.
pub fn alice_bob_targets() -> Vec<BackendDescriptor> {
    let physical_noise = NoiseProfile {
        kappa_1: 100.0,
        kappa_2: 10_000_000.0,
        average_nb_photons: 16.0,
    };

    [
        Capabilities::physical_cats("EMU:1Q:LESCANNE_2020", 1),
        Capabilities::physical_cats("EMU:6Q:PHYSICAL_CATS", 6)
            .with_noise_profile(physical_noise.clone()),
        Capabilities::physical_cats("EMU:40Q:PHYSICAL_CATS", 40)
            .with_noise_profile(physical_noise),
        Capabilities::logical("EMU:15Q:LOGICAL_EARLY", 15),
        Capabilities::logical("EMU:40Q:LOGICAL_TARGET", 40),
        Capabilities::logical("EMU:100Q:LOGICAL_DENSE", 100),
    ]
    .into_iter()
    .map(BackendDescriptor::new)
    .collect()
}
