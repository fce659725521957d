// Copyright 2026 The Binius Developers
use gf2e_field::{AffineSpec, FieldSpec, PolyFormat, Polynomial};
use gf2e_frontend::{
	CircuitShape, Clocking, Direction, GeneratedModule, Port, StimulusValue,
	netlist::{Assign, BitRange, Expr, Instance, Item, Register},
};
use itertools::Itertools;

const INDENT: &str = "    ";
const RULE: &str =
	"// ==============================================================================";
const THIN_RULE: &str =
	"// ------------------------------------------------------------------------------";

/// `[W-1:0]`, kept for single bits too so any data signal can be bit-selected.
fn range(width: usize) -> String {
	format!("[{width}-1:0]")
}

/// Clock, reset and enable lines of `module`, the only signals declared as scalars.
fn control_signals(module: &GeneratedModule) -> Vec<&str> {
	let registers = module
		.netlist
		.registers()
		.flat_map(|reg| [reg.clock.as_str(), reg.reset.as_str(), reg.enable.as_str()]);
	let clocking = module
		.harness
		.clocking
		.iter()
		.flat_map(|c| [c.clock.as_str(), c.reset.as_str(), c.enable.as_str()]);
	registers.chain(clocking).unique().collect()
}

fn part_select(range: BitRange) -> String {
	if range.width == 1 {
		format!("[{}]", range.lsb)
	} else {
		format!("[{}-1:{}]", range.lsb + range.width, range.lsb)
	}
}

fn literal(width: usize, value: &Polynomial) -> String {
	format!("{width}'d{}", value.as_biguint())
}

fn alg(value: &Polynomial) -> String {
	value.to_string_as(PolyFormat::Alg)
}

fn expr(node: &Expr, nested: bool) -> String {
	let (text, compound) = match node {
		Expr::Signal(signal) => (signal.clone(), false),
		Expr::Slice { signal, range } => (format!("{signal}{}", part_select(*range)), false),
		Expr::Bit { signal, index } => (format!("{signal}[{index}]"), false),
		Expr::Const { width, value } => (literal(*width, value), false),
		Expr::ShiftLeft { signal, amount } => (format!("{signal} << {amount}"), true),
		Expr::Xor(lhs, rhs) => (format!("{} ^ {}", expr(lhs, true), expr(rhs, true)), true),
		Expr::Mux {
			select,
			then,
			otherwise,
		} => (
			format!(
				"{} ? {} : {}",
				expr(select, true),
				expr(then, true),
				expr(otherwise, true)
			),
			true,
		),
	};
	if nested && compound {
		format!("({text})")
	} else {
		text
	}
}

fn banner(title: &str, body: &[String]) -> Vec<String> {
	let mut lines = vec![RULE.to_string(), format!("// {title}"), THIN_RULE.to_string()];
	lines.extend(body.iter().map(|line| {
		if line.is_empty() {
			"//".to_string()
		} else {
			format!("// {line}")
		}
	}));
	lines.push(RULE.to_string());
	lines.push(String::new());
	lines
}

fn constants(affine: Option<&AffineSpec>, field: Option<&FieldSpec>) -> Vec<String> {
	let mut lines = Vec::new();
	if let Some(affine) = affine {
		lines.push(format!("    - a(x) = {}", alg(&affine.a)));
		lines.push(format!("    - c(x) = {}", alg(&affine.c)));
	}
	if let Some(field) = field {
		lines.push(format!("    - h(x) = {}", alg(field.modulus())));
	}
	lines
}

fn title(shape: &CircuitShape) -> String {
	match shape {
		CircuitShape::XorTree { .. } => "Binary XOR Tree".into(),
		CircuitShape::Affine { .. } => "GF(2) Polynomial Affine Computation".into(),
		CircuitShape::ModReduce { .. } => "GF(2) Polynomial Modular Reduction".into(),
		CircuitShape::AffineMod { .. } => {
			"GF(2) Polynomial Affine Computation with Modular Reduction".into()
		}
		CircuitShape::Prng { field, .. } => {
			format!("Pseudorandom Number Generator (PRNG) over GF(2^{})", field.degree())
		}
	}
}

/// Header comment describing what the module computes.
fn description(module: &GeneratedModule) -> Vec<String> {
	let mut lines = match &module.shape {
		CircuitShape::XorTree { vectors, width } => vec![
			format!("Bitwise XOR of {vectors} vectors of {width} bits, concatenated into one"),
			format!("{}-bit input, reduced by a balanced binary tree.", vectors * width),
		],
		CircuitShape::Affine { affine, .. } => {
			let mut lines = vec!["Computes a(x)p(x) + c(x) over GF(2) with constants:".into()];
			lines.extend(constants(Some(affine), None));
			lines
		}
		CircuitShape::ModReduce { field, .. } => {
			let mut lines = vec!["Computes y(x) mod h(x) over GF(2) with constant:".into()];
			lines.extend(constants(None, Some(field)));
			lines
		}
		CircuitShape::AffineMod { affine, field, .. } => {
			let mut lines =
				vec!["Computes a(x)p(x) + c(x) mod h(x) over GF(2) with constants:".into()];
			lines.extend(constants(Some(affine), Some(field)));
			lines
		}
		CircuitShape::Prng { affine, field } => {
			let mut lines = vec![
				"Affine recurrence x_{n+1}(x) = a(x)x_n(x) + c(x) mod h(x)".into(),
				format!("over GF(2^{}), with constants:", field.degree()),
			];
			lines.extend(constants(Some(affine), Some(field)));
			lines
		}
	};

	lines.push(String::new());
	lines.push("PORTS:".into());
	for port in &module.ports {
		let direction = match port.direction {
			Direction::Input => "input",
			Direction::Output => "output",
		};
		lines.push(format!("    - {:<10}: {}-bit {direction}", port.name, port.width));
	}
	lines
}

fn port_declaration(port: &Port, control: &[&str]) -> String {
	let direction = match port.direction {
		Direction::Input => "input ",
		Direction::Output => "output",
	};
	if control.contains(&port.name.as_str()) {
		format!("{INDENT}{direction} wire {}", port.name)
	} else {
		format!("{INDENT}{direction} wire {} {}", range(port.width), port.name)
	}
}

fn declaration(kind: &str, name: &str, width: usize, control: &[&str]) -> String {
	if control.contains(&name) {
		format!("{INDENT}{kind} {name};")
	} else {
		format!("{INDENT}{kind} {} {name};", range(width))
	}
}

fn instance(lines: &mut Vec<String>, instance: &Instance) {
	lines.push(format!("{INDENT}{} {} (", instance.module, instance.name));
	let connections = instance
		.connections
		.iter()
		.map(|(port, signal)| format!("{INDENT}{INDENT}.{port}({signal})"))
		.join(",\n");
	lines.push(connections);
	lines.push(format!("{INDENT});"));
	lines.push(String::new());
}

fn register(lines: &mut Vec<String>, register: &Register) {
	lines.push(declaration("reg", &register.name, register.width, &[]));
	lines.push(String::new());
	lines.push(format!("{INDENT}always @(posedge {}) begin", register.clock));
	lines.push(format!("{INDENT}{INDENT}if ({})", register.reset));
	lines.push(format!("{INDENT}{INDENT}{INDENT}{} <= {};", register.name, register.reset_value));
	lines.push(format!("{INDENT}{INDENT}else if ({})", register.enable));
	lines.push(format!("{INDENT}{INDENT}{INDENT}{} <= {};", register.name, register.next));
	lines.push(format!("{INDENT}end"));
	lines.push(String::new());
}

fn assign(assign: &Assign) -> String {
	let target = match assign.range {
		Some(range) => format!("{}{}", assign.target, part_select(range)),
		None => assign.target.clone(),
	};
	format!("{INDENT}assign {target} = {};", expr(&assign.expr, false))
}

/// Verilog source of `module`.
pub fn render_module(module: &GeneratedModule) -> String {
	let control = control_signals(module);
	let mut lines = banner(&title(&module.shape), &description(module));

	lines.push(format!("module {} (", module.name));
	lines.push(
		module
			.ports
			.iter()
			.map(|port| port_declaration(port, &control))
			.join(",\n"),
	);
	lines.push(");".into());

	for item in module.netlist.items() {
		match item {
			Item::Comment(text) => {
				if lines.last().is_some_and(|line| !line.is_empty()) {
					lines.push(String::new());
				}
				lines.push(format!("{INDENT}// {text}"));
			}
			Item::Wire(wire) => lines.push(declaration("wire", &wire.name, wire.width, &control)),
			Item::Register(reg) => register(&mut lines, reg),
			Item::Instance(inst) => instance(&mut lines, inst),
			Item::Assign(a) => lines.push(assign(a)),
		}
	}

	lines.push("endmodule".into());
	lines.push(String::new());
	lines.join("\n")
}

fn stimulus(width: usize, value: &StimulusValue) -> String {
	match value {
		StimulusValue::Scalar(value) => literal(width, value),
		// The first vector sits in the lowest lane, i.e. last in a concatenation.
		StimulusValue::Vectors { width, values } => {
			format!("{{{}}}", values.iter().rev().map(|v| literal(*width, v)).join(", "))
		}
	}
}

fn clocked_body(lines: &mut Vec<String>, module: &GeneratedModule, clocking: &Clocking) {
	let harness = &module.harness;
	lines.push(format!("{INDENT}always #5 {0} = ~{0};", clocking.clock));
	lines.push(String::new());
	lines.push(format!("{INDENT}initial begin"));
	for signal in [&clocking.clock, &clocking.reset, &clocking.enable] {
		lines.push(format!("{INDENT}{INDENT}{signal} = 1'b0;"));
	}
	for drive in &harness.drives {
		let value = stimulus(drive.width, &drive.value);
		lines.push(format!("{INDENT}{INDENT}{} = {value};", drive.port));
	}
	lines.push(String::new());
	lines.push(format!("{INDENT}{INDENT}#10"));
	lines.push(format!("{INDENT}{INDENT}{} = 1'b1;", clocking.reset));
	lines.push(String::new());
	lines.push(format!("{INDENT}{INDENT}#10"));
	lines.push(format!("{INDENT}{INDENT}{} = 1'b0;", clocking.reset));
	lines.push(format!("{INDENT}{INDENT}{} = 1'b1;", clocking.enable));
	lines.push(String::new());
	lines.push(format!("{INDENT}{INDENT}// Iterate {} times", clocking.cycles));
	lines.push(format!(
		"{INDENT}{INDENT}repeat ({}) @(posedge {});",
		clocking.cycles, clocking.clock
	));
	lines.push(String::new());
	// Sample between edges so the last update has settled and the next has not started.
	lines.push(format!("{INDENT}{INDENT}#1"));
}

fn combinational_body(lines: &mut Vec<String>, module: &GeneratedModule) {
	lines.push(format!("{INDENT}initial begin"));
	lines.push(format!("{INDENT}{INDENT}#10"));
	for drive in &module.harness.drives {
		let value = stimulus(drive.width, &drive.value);
		lines.push(format!("{INDENT}{INDENT}{} = {value};", drive.port));
	}
	lines.push(String::new());
	lines.push(format!("{INDENT}{INDENT}#10"));
}

/// Self-checking testbench driving `module` with its harness stimulus.
pub fn render_testbench(module: &GeneratedModule) -> String {
	let name = format!("tb_{}", module.name);
	let harness = &module.harness;
	let control = control_signals(module);

	let mut body = vec![
		format!("Testbench for {}.v", module.name),
		String::new(),
		"Applies one random stimulus and compares the output against a value".into(),
		"computed in software. Prints a pass or fail message and stops.".into(),
	];
	if let Some(clocking) = &harness.clocking {
		body.push(format!(
			"The clock runs {} enabled cycles after reset before the check.",
			clocking.cycles
		));
	}
	let mut lines = banner(&format!("Testbench for {}", title(&module.shape)), &body);

	lines.push("`timescale 1ns/1ps".into());
	lines.push(String::new());
	lines.push(format!("module {name};"));
	lines.push(String::new());
	for port in &module.ports {
		let kind = match port.direction {
			Direction::Input => "reg",
			Direction::Output => "wire",
		};
		lines.push(declaration(kind, &port.name, port.width, &control));
	}
	lines.push(String::new());

	lines.push(format!("{INDENT}{} DUT (", module.name));
	lines.push(
		module
			.ports
			.iter()
			.map(|port| format!("{INDENT}{INDENT}.{0}({0})", port.name))
			.join(",\n"),
	);
	lines.push(format!("{INDENT});"));
	lines.push(String::new());

	match &harness.clocking {
		Some(clocking) => clocked_body(&mut lines, module, clocking),
		None => combinational_body(&mut lines, module),
	}

	let expected = &harness.expected;
	lines.push(format!(
		"{INDENT}{INDENT}if ({} == {})",
		expected.port,
		literal(expected.width, &expected.value)
	));
	lines.push(format!("{INDENT}{INDENT}{INDENT}$display(\"Test Passed --> {name}\");"));
	lines.push(format!("{INDENT}{INDENT}else"));
	lines.push(format!("{INDENT}{INDENT}{INDENT}$display(\"Test Failed --> {name}\");"));
	lines.push(String::new());
	lines.push(format!("{INDENT}{INDENT}$stop;"));
	lines.push(format!("{INDENT}end"));
	lines.push(String::new());
	lines.push("endmodule".into());
	lines.push(String::new());
	lines.join("\n")
}

#[cfg(test)]
mod tests {
	use gf2e_frontend::{GenerationSession, netlist::Expr};
	use rstest::rstest;

	use super::*;

	fn poly(value: u64) -> Polynomial {
		Polynomial::from(value)
	}

	#[rstest]
	#[case(Expr::signal("in_poly"), "in_poly")]
	#[case(Expr::ShiftLeft { signal: "in_poly".into(), amount: 4 }, "in_poly << 4")]
	#[case(Expr::constant(20, poly(1)), "20'd1")]
	#[case(Expr::Slice { signal: "in_poly".into(), range: BitRange::new(0, 8) }, "in_poly[8-1:0]")]
	#[case(Expr::Slice { signal: "v".into(), range: BitRange::new(3, 1) }, "v[3]")]
	#[case(Expr::xor(Expr::signal("a"), Expr::signal("b")), "a ^ b")]
	#[case(
		Expr::mux(
			Expr::Bit { signal: "in_poly".into(), index: 9 },
			Expr::constant(8, poly(58)),
			Expr::constant(8, poly(0)),
		),
		"in_poly[9] ? 8'd58 : 8'd0"
	)]
	#[case(
		Expr::xor(Expr::ShiftLeft { signal: "p".into(), amount: 1 }, Expr::signal("q")),
		"(p << 1) ^ q"
	)]
	fn test_expressions(#[case] input: Expr, #[case] rendered: &str) {
		assert_eq!(expr(&input, false), rendered);
	}

	#[test]
	fn test_xor_tree_source() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::XorTree {
				vectors: 3,
				width: 4,
			})
			.unwrap();
		let source = render_module(session.module("xor_tree_3_4").unwrap());

		assert!(source.contains(concat!(
			"module xor_tree_3_4 (\n",
			"    input  wire [12-1:0] in_vectors,\n",
			"    output wire [4-1:0] out_xor\n",
			");",
		)));
		assert!(source.contains("    assign vec_0_2 = in_vectors[12-1:8];"));
		assert!(source.contains(concat!(
			"    // Tree stage 1\n",
			"    wire [4-1:0] vec_1_0;\n",
			"    assign vec_1_0 = vec_0_0 ^ vec_0_1;",
		)));
		assert!(source.contains("    assign vec_1_1 = vec_0_2;"));
		assert!(source.contains("    assign out_xor = vec_2_0;\nendmodule"));
	}

	#[test]
	fn test_xor_tree_testbench_concatenates_lanes_high_first() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::XorTree {
				vectors: 2,
				width: 4,
			})
			.unwrap();
		let module = session.module("xor_tree_2_4").unwrap();
		let StimulusValue::Vectors { values, .. } = &module.harness.drives[0].value else {
			panic!("xor tree harness drives packed vectors");
		};
		let bench = render_testbench(module);

		let concat = format!(
			"in_vectors = {{4'd{}, 4'd{}}};",
			values[1].as_biguint(),
			values[0].as_biguint()
		);
		assert!(bench.contains(&concat), "{bench}");
		assert!(bench.contains("module tb_xor_tree_2_4;"));
		assert!(bench.contains("$display(\"Test Passed --> tb_xor_tree_2_4\");"));
		assert!(bench.contains("`timescale 1ns/1ps"));
	}

	#[test]
	fn test_prng_source_and_testbench() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::Prng {
				affine: AffineSpec::new(poly(23), poly(5)),
				field: FieldSpec::new(poly(285)).unwrap(),
			})
			.unwrap();
		let module = session.module("gf2_8_prng").unwrap();

		let source = render_module(module);
		assert!(source.contains("    input  wire clk,"));
		assert!(source.contains("    reg [8-1:0] state;"));
		assert!(source.contains(concat!(
			"        if (rst)\n",
			"            state <= seed;\n",
			"        else if (enable)\n",
			"            state <= next_state;",
		)));
		assert!(source.contains(concat!(
			"    gf2_poly_affine_mod_8 GF2_POLY_AFFINE_MOD_8 (\n",
			"        .in_poly(state),\n",
			"        .out_poly(next_state)\n",
			"    );",
		)));
		assert!(source.contains("//     - h(x) = x^8 + x^4 + x^3 + x^2 + 1"));

		let bench = render_testbench(module);
		assert!(bench.contains("    always #5 clk = ~clk;"));
		assert!(bench.contains("        repeat (100) @(posedge clk);"));
		assert!(bench.contains(&format!(
			"if (prng_out == 8'd{})",
			module.harness.expected.value.as_biguint()
		)));
	}

	/// Declarations without a `[W-1:0]` range, other than clock, reset and enable.
	fn scalar_data_declarations(text: &str) -> Vec<String> {
		text.lines()
			.map(|line| line.trim().trim_end_matches([',', ';']))
			.filter(|line| {
				["input  wire ", "output wire ", "wire ", "reg "]
					.iter()
					.any(|kind| line.starts_with(kind))
			})
			.filter(|line| !line.contains('['))
			.filter(|line| !["clk", "rst", "enable"].iter().any(|name| line.ends_with(name)))
			.map(str::to_string)
			.collect()
	}

	#[test]
	fn test_single_bit_signals_keep_their_range() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::Prng {
				affine: AffineSpec::new(poly(1), poly(1)),
				field: FieldSpec::new(poly(3)).unwrap(),
			})
			.unwrap();

		for module in session.modules() {
			let source = render_module(module);
			assert_eq!(scalar_data_declarations(&source), Vec::<String>::new(), "{source}");
			let bench = render_testbench(module);
			assert_eq!(scalar_data_declarations(&bench), Vec::<String>::new(), "{bench}");
		}

		let reducer = render_module(session.module("gf2_poly_mod_1").unwrap());
		assert!(reducer.contains("    input  wire [1-1:0] in_poly,"));
		assert!(reducer.contains("    wire [1-1:0] w_in_vectors;"));

		let prng = session.module("gf2_1_prng").unwrap();
		let source = render_module(prng);
		assert!(source.contains("    input  wire clk,"));
		assert!(source.contains("    input  wire [1-1:0] seed,"));
		assert!(source.contains("    reg [1-1:0] state;"));
		let bench = render_testbench(prng);
		assert!(bench.contains("    reg clk;"));
		assert!(bench.contains("    wire [1-1:0] prng_out;"));
	}

	#[test]
	fn test_single_lane_single_bit_xor_tree() {
		let mut session = GenerationSession::default();
		session
			.request(&CircuitShape::XorTree {
				vectors: 1,
				width: 1,
			})
			.unwrap();
		let source = render_module(session.module("xor_tree_1_1").unwrap());

		assert!(source.contains("    input  wire [1-1:0] in_vectors,"));
		assert!(source.contains("    output wire [1-1:0] out_xor"));
		assert!(source.contains("    wire [1-1:0] vec_0_0;"));
		assert!(source.contains("    assign vec_0_0 = in_vectors[0];"));
	}
}
