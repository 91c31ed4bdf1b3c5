//! Capabilities of Alice & Bob cat-qubit targets.
//!
//! A backend's capabilities describe what it accepts: qubit count, gate set,
//! connectivity, shot limit and (for physical cats) the dissipation
//! parameters of the emulated hardware. Neither the resolver nor the device
//! inspects them; backends check circuits against them in `validate`.
//!
//! All edges in [`Topology`] are bidirectional.

use serde::{Deserialize, Serialize};

/// Hardware description of a cat-qubit backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend name as listed in the provider catalog.
    pub name: String,
    pub num_qubits: u32,
    pub gate_set: GateSet,
    pub topology: Topology,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Emulator rather than a hardware queue.
    pub is_simulator: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_profile: Option<NoiseProfile>,
}

impl Capabilities {
    /// Emulated physical cat qubits on a linear chain.
    pub fn physical_cats(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_set: GateSet::physical_cats(),
            topology: Topology::linear(num_qubits),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["physical_cats".into()],
            noise_profile: None,
        }
    }

    /// Emulated logical qubits (repetition code over cat qubits).
    ///
    /// Logical emulators route internally, so connectivity is all-to-all.
    pub fn logical(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gate_set: GateSet::logical(),
            topology: Topology::full(num_qubits),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["logical_qubits".into()],
            noise_profile: None,
        }
    }

    pub fn with_noise_profile(mut self, profile: NoiseProfile) -> Self {
        self.noise_profile = Some(profile);
        self
    }
}

/// Gate names (OpenQASM 3, lowercase) accepted by a backend.
///
/// An empty `native` list means every supported gate is native.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    pub single_qubit: Vec<String>,
    pub two_qubit: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub three_qubit: Vec<String>,
    pub native: Vec<String>,
}

impl GateSet {
    /// Bias-preserving gates of physical cat qubits.
    ///
    /// There is no native Hadamard: it would break the noise bias.
    pub fn physical_cats() -> Self {
        let single: Vec<String> = ["x", "z", "rz"].map(String::from).to_vec();
        let mut native = single.clone();
        native.extend([String::from("cx"), String::from("ccx")]);
        Self {
            native,
            single_qubit: single,
            two_qubit: vec!["cx".into()],
            three_qubit: vec!["ccx".into()],
        }
    }

    /// Gates exposed by the logical-qubit emulators.
    pub fn logical() -> Self {
        Self {
            single_qubit: ["x", "z", "h", "s", "sdg", "t", "tdg"]
                .map(String::from)
                .to_vec(),
            two_qubit: vec!["cx".into()],
            three_qubit: vec!["ccx".into()],
            native: vec![],
        }
    }

    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit
            .iter()
            .chain(&self.two_qubit)
            .chain(&self.three_qubit)
            .any(|g| g == gate)
    }

    pub fn is_native(&self, gate: &str) -> bool {
        if self.native.is_empty() {
            self.contains(gate)
        } else {
            self.native.iter().any(|g| g == gate)
        }
    }
}

/// Qubit connectivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    pub kind: TopologyKind,
    /// Coupled qubit pairs.
    pub edges: Vec<(u32, u32)>,
}

impl Topology {
    pub fn linear(n: u32) -> Self {
        Self {
            kind: TopologyKind::Linear,
            edges: (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
        }
    }

    pub fn full(n: u32) -> Self {
        let edges = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        Self {
            kind: TopologyKind::FullyConnected,
            edges,
        }
    }

    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.edges
            .iter()
            .any(|&(a, b)| (a == q1 && b == q2) || (a == q2 && b == q1))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopologyKind {
    FullyConnected,
    Linear,
}

/// Dissipation parameters of emulated cat qubits.
///
/// Rates are in hertz. A caller can override them per device through the
/// `kappa_1`, `kappa_2` and `average_nb_photons` keyword options, which the
/// provider reads; the adapter itself only forwards them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseProfile {
    /// Single-photon loss rate.
    pub kappa_1: f64,
    /// Two-photon dissipation rate.
    pub kappa_2: f64,
    /// Mean photon number of the cat states.
    pub average_nb_photons: f64,
}

impl NoiseProfile {
    /// Bit-flip suppression grows exponentially with this ratio.
    pub fn kappa_ratio(&self) -> f64 {
        self.kappa_2 / self.kappa_1
    }

    /// Apply numeric `kappa_1` / `kappa_2` / `average_nb_photons` overrides.
    ///
    /// Other keys, and values that are not numbers, are left to the provider.
    pub fn with_overrides(&self, options: &serde_json::Map<String, serde_json::Value>) -> Self {
        let read = |key: &str, current: f64| {
            options
                .get(key)
                .and_then(serde_json::Value::as_f64)
                .unwrap_or(current)
        };
        Self {
            kappa_1: read("kappa_1", self.kappa_1),
            kappa_2: read("kappa_2", self.kappa_2),
            average_nb_photons: read("average_nb_photons", self.average_nb_photons),
        }
    }
}
