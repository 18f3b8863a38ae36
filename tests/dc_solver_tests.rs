//! End-to-end netlist-build-then-solve scenarios.

use approx::assert_relative_eq;

use circuit_core::components::{ComponentSpec, ComponentSpecKind};
use circuit_core::netlist::{self, PinRef};
use circuit_core::solver::{self, SolverConfig};

fn spec(id: &str, kind: ComponentSpecKind) -> ComponentSpec {
    ComponentSpec::new(id, kind)
}

#[test]
fn led_with_series_resistor_turns_on() {
    let specs = vec![
        spec(
            "V1",
            ComponentSpecKind::VoltageSource {
                voltage: 5.0,
                max_current: None,
            },
        ),
        spec("R1", ComponentSpecKind::Resistor { resistance: 330.0 }),
        spec("D1", ComponentSpecKind::Led { vf: 2.0, rs: 20.0 }),
        // Lends a literal GND pin so V1's negative rail has a true reference.
        spec("U1", ComponentSpecKind::Hc04 { vcc_nominal: 5.0 }),
    ];
    let wires = vec![
        (PinRef::new("V1", "PLUS"), PinRef::new("R1", "A")),
        (PinRef::new("R1", "B"), PinRef::new("D1", "AN")),
        (PinRef::new("D1", "K"), PinRef::new("V1", "MINUS")),
        (PinRef::new("D1", "K"), PinRef::new("U1", "GND")),
    ];

    let mut netlist = netlist::build(&specs, &wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);

    // The on-branch VS pins Vd = V(AN) - V(K) at exactly Vf.
    let (an, k) = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Led(led) => Some((led.an, led.k)),
        _ => None,
    }).unwrap();
    let vd = result.node_voltages[&an] - result.node_voltages[&k];
    assert_relative_eq!(vd, 2.0, epsilon = 1e-3);
    assert!(result.vs_currents.contains_key("D1_Vf"));
}

#[test]
fn lm339_active_pulls_output_low_when_in_plus_exceeds_in_minus() {
    let specs = vec![
        spec(
            "V1",
            ComponentSpecKind::VoltageSource {
                voltage: 5.0,
                max_current: None,
            },
        ),
        spec("RPULL", ComponentSpecKind::Resistor { resistance: 10_000.0 }),
        spec("VINPOS", ComponentSpecKind::VoltageSource { voltage: 3.0, max_current: None }),
        spec("VINNEG", ComponentSpecKind::VoltageSource { voltage: 2.0, max_current: None }),
        spec("U1", ComponentSpecKind::Lm339),
    ];
    let wires = vec![
        (PinRef::new("V1", "PLUS"), PinRef::new("RPULL", "A")),
        (PinRef::new("RPULL", "B"), PinRef::new("U1", "OUT")),
        (PinRef::new("VINPOS", "PLUS"), PinRef::new("U1", "IN+")),
        (PinRef::new("VINNEG", "PLUS"), PinRef::new("U1", "IN-")),
        (PinRef::new("V1", "MINUS"), PinRef::new("VINPOS", "MINUS")),
        (PinRef::new("V1", "MINUS"), PinRef::new("VINNEG", "MINUS")),
        (PinRef::new("V1", "MINUS"), PinRef::new("U1", "GND")),
    ];

    let mut netlist = netlist::build(&specs, &wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);

    // IN+ (3V) > IN- (2V): this part's polarity activates and pulls OUT low.
    let out_node = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Lm339(cmp) => Some(cmp.out),
        _ => None,
    }).unwrap();
    assert_relative_eq!(result.node_voltages[&out_node], 0.0, epsilon = 1e-3);
}

#[test]
fn lm339_inactive_leaves_output_pulled_high() {
    let specs = vec![
        spec(
            "V1",
            ComponentSpecKind::VoltageSource {
                voltage: 5.0,
                max_current: None,
            },
        ),
        spec("RPULL", ComponentSpecKind::Resistor { resistance: 10_000.0 }),
        spec("VINPOS", ComponentSpecKind::VoltageSource { voltage: 2.0, max_current: None }),
        spec("VINNEG", ComponentSpecKind::VoltageSource { voltage: 3.0, max_current: None }),
        spec("U1", ComponentSpecKind::Lm339),
    ];
    let wires = vec![
        (PinRef::new("V1", "PLUS"), PinRef::new("RPULL", "A")),
        (PinRef::new("RPULL", "B"), PinRef::new("U1", "OUT")),
        (PinRef::new("VINPOS", "PLUS"), PinRef::new("U1", "IN+")),
        (PinRef::new("VINNEG", "PLUS"), PinRef::new("U1", "IN-")),
        (PinRef::new("V1", "MINUS"), PinRef::new("VINPOS", "MINUS")),
        (PinRef::new("V1", "MINUS"), PinRef::new("VINNEG", "MINUS")),
        (PinRef::new("V1", "MINUS"), PinRef::new("U1", "GND")),
    ];

    let mut netlist = netlist::build(&specs, &wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);

    // IN+ (2V) < IN- (3V): inactive, high-Z; RPULL carries no current so
    // OUT floats up to the V1 rail it's tied to.
    let out_node = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Lm339(cmp) => Some(cmp.out),
        _ => None,
    }).unwrap();
    assert_relative_eq!(result.node_voltages[&out_node], 5.0, epsilon = 1e-3);
}

#[test]
fn hc04_inverter_flips_output_when_input_rail_changes() {
    let specs = vec![
        spec(
            "VCC",
            ComponentSpecKind::VoltageSource {
                voltage: 5.0,
                max_current: None,
            },
        ),
        spec("U1", ComponentSpecKind::Hc04 { vcc_nominal: 5.0 }),
    ];
    let high_wires = vec![
        (PinRef::new("VCC", "PLUS"), PinRef::new("U1", "VCC")),
        (PinRef::new("VCC", "MINUS"), PinRef::new("U1", "GND")),
        (PinRef::new("VCC", "PLUS"), PinRef::new("U1", "IN")),
    ];

    let mut netlist = netlist::build(&specs, &high_wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);
    let out_node = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Hc04(cmp) => Some(cmp.out),
        _ => None,
    }).unwrap();
    assert_relative_eq!(result.node_voltages[&out_node], 0.0, epsilon = 1e-3);

    // Flip IN to GND and re-solve from a fresh netlist build.
    let low_wires = vec![
        (PinRef::new("VCC", "PLUS"), PinRef::new("U1", "VCC")),
        (PinRef::new("VCC", "MINUS"), PinRef::new("U1", "GND")),
        (PinRef::new("VCC", "MINUS"), PinRef::new("U1", "IN")),
    ];
    let mut netlist = netlist::build(&specs, &low_wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);
    let out_node = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Hc04(cmp) => Some(cmp.out),
        _ => None,
    }).unwrap();
    assert_relative_eq!(result.node_voltages[&out_node], 5.0, epsilon = 1e-3);
}

#[test]
fn open_switch_leaves_subgraphs_independent() {
    let specs = vec![
        spec(
            "VA",
            ComponentSpecKind::VoltageSource {
                voltage: 9.0,
                max_current: None,
            },
        ),
        spec("RA", ComponentSpecKind::Resistor { resistance: 1000.0 }),
        spec(
            "VB",
            ComponentSpecKind::VoltageSource {
                voltage: 3.0,
                max_current: None,
            },
        ),
        spec("RB", ComponentSpecKind::Resistor { resistance: 2000.0 }),
        spec("S1", ComponentSpecKind::Switch { closed: false }),
        // Each subgraph gets its own GND-pin-bearing part, which is
        // also how either subgraph gets an absolute voltage reference
        // at all (a bare resistor/source pair has no literal GND pin).
        spec("UA", ComponentSpecKind::Hc04 { vcc_nominal: 5.0 }),
        spec("UB", ComponentSpecKind::Hc04 { vcc_nominal: 5.0 }),
    ];
    let wires = vec![
        (PinRef::new("VA", "PLUS"), PinRef::new("RA", "A")),
        (PinRef::new("RA", "B"), PinRef::new("VA", "MINUS")),
        (PinRef::new("VA", "MINUS"), PinRef::new("UA", "GND")),
        (PinRef::new("VB", "PLUS"), PinRef::new("RB", "A")),
        (PinRef::new("RB", "B"), PinRef::new("VB", "MINUS")),
        (PinRef::new("VB", "MINUS"), PinRef::new("UB", "GND")),
        // S1 bridges the two subgraphs but stays open.
        (PinRef::new("S1", "A"), PinRef::new("VA", "PLUS")),
        (PinRef::new("S1", "B"), PinRef::new("VB", "PLUS")),
    ];

    let mut netlist = netlist::build(&specs, &wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);

    let a_high = netlist
        .node_list
        .iter()
        .copied()
        .find(|&n| (result.node_voltages[&n] - 9.0).abs() < 1e-3);
    let b_high = netlist
        .node_list
        .iter()
        .copied()
        .find(|&n| (result.node_voltages[&n] - 3.0).abs() < 1e-3);
    assert!(a_high.is_some(), "subgraph A should reach 9V independent of B");
    assert!(b_high.is_some(), "subgraph B should reach 3V independent of A");
}

#[test]
fn closed_switch_forces_equal_voltages() {
    let specs = vec![
        spec(
            "V1",
            ComponentSpecKind::VoltageSource {
                voltage: 6.0,
                max_current: None,
            },
        ),
        spec("R1", ComponentSpecKind::Resistor { resistance: 1000.0 }),
        spec("S1", ComponentSpecKind::Switch { closed: true }),
        spec("R2", ComponentSpecKind::Resistor { resistance: 1000.0 }),
    ];
    let wires = vec![
        (PinRef::new("V1", "PLUS"), PinRef::new("R1", "A")),
        (PinRef::new("R1", "B"), PinRef::new("S1", "A")),
        (PinRef::new("S1", "B"), PinRef::new("R2", "A")),
        (PinRef::new("R2", "B"), PinRef::new("V1", "MINUS")),
    ];

    let mut netlist = netlist::build(&specs, &wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);

    let r1_b = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Resistor(r) if r.id.to_string() == "R1" => Some(r.b),
        _ => None,
    });
    let r2_a = netlist.components.iter().find_map(|c| match c {
        circuit_core::components::Component::Resistor(r) if r.id.to_string() == "R2" => Some(r.a),
        _ => None,
    });
    let (r1_b, r2_a) = (r1_b.unwrap(), r2_a.unwrap());
    assert_relative_eq!(
        result.node_voltages[&r1_b],
        result.node_voltages[&r2_a],
        epsilon = 1e-3
    );
}

#[test]
fn no_ground_and_no_source_leaves_everything_at_zero() {
    let specs = vec![
        spec("R1", ComponentSpecKind::Resistor { resistance: 1000.0 }),
        spec("R2", ComponentSpecKind::Resistor { resistance: 2000.0 }),
    ];
    let wires = vec![(PinRef::new("R1", "B"), PinRef::new("R2", "A"))];

    let mut netlist = netlist::build(&specs, &wires).unwrap();
    let result = solver::solve(&mut netlist.components, &netlist.node_list, SolverConfig::default()).unwrap();
    assert!(result.converged);
    for v in result.node_voltages.values() {
        assert_relative_eq!(*v, 0.0, epsilon = 1e-6);
    }
}
