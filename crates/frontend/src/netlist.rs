// Copyright 2026 The Binius Developers
//! Structural description of a generated module: wires, registers, sub-module instances and
//! continuous assignments, kept in declaration order so renderers can reproduce the layout.

use gf2e_field::Polynomial;

/// Contiguous bit range `[lsb + width - 1 : lsb]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
	pub lsb: usize,
	pub width: usize,
}

impl BitRange {
	pub fn new(lsb: usize, width: usize) -> Self {
		Self { lsb, width }
	}

	/// Range of the `index`-th `width`-bit lane of a packed bus.
	pub fn lane(index: usize, width: usize) -> Self {
		Self::new(index * width, width)
	}

	pub fn msb(&self) -> usize {
		self.lsb + self.width - 1
	}
}

/// Right-hand side of an assignment.
///
/// Results are sized by the assignment target: operands are zero-extended to the target width
/// first and truncated to it last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
	Signal(String),
	Slice { signal: String, range: BitRange },
	Bit { signal: String, index: usize },
	Const { width: usize, value: Polynomial },
	ShiftLeft { signal: String, amount: usize },
	Xor(Box<Expr>, Box<Expr>),
	/// `select ? then : otherwise`, where any non-zero select picks `then`.
	Mux {
		select: Box<Expr>,
		then: Box<Expr>,
		otherwise: Box<Expr>,
	},
}

impl Expr {
	pub fn signal(name: impl Into<String>) -> Self {
		Self::Signal(name.into())
	}

	pub fn constant(width: usize, value: Polynomial) -> Self {
		Self::Const { width, value }
	}

	pub fn xor(lhs: Expr, rhs: Expr) -> Self {
		Self::Xor(Box::new(lhs), Box::new(rhs))
	}

	pub fn mux(select: Expr, then: Expr, otherwise: Expr) -> Self {
		Self::Mux {
			select: Box::new(select),
			then: Box::new(then),
			otherwise: Box::new(otherwise),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
	pub name: String,
	pub width: usize,
}

/// Rising-edge register with synchronous reset taking priority over enable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
	pub name: String,
	pub width: usize,
	pub clock: String,
	pub reset: String,
	pub reset_value: String,
	pub enable: String,
	pub next: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
	pub module: String,
	pub name: String,
	/// `(sub-module port, local signal)` pairs.
	pub connections: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
	pub target: String,
	/// Part of the target driven by this assignment, or all of it.
	pub range: Option<BitRange>,
	pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
	Comment(String),
	Wire(Wire),
	Register(Register),
	Instance(Instance),
	Assign(Assign),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netlist {
	items: Vec<Item>,
}

impl Netlist {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn items(&self) -> &[Item] {
		&self.items
	}

	pub fn comment(&mut self, text: impl Into<String>) {
		self.items.push(Item::Comment(text.into()));
	}

	/// Declares a wire and returns its name.
	pub fn wire(&mut self, name: impl Into<String>, width: usize) -> String {
		let name = name.into();
		self.items.push(Item::Wire(Wire {
			name: name.clone(),
			width,
		}));
		name
	}

	pub fn register(&mut self, register: Register) {
		self.items.push(Item::Register(register));
	}

	pub fn instance(
		&mut self,
		module: impl Into<String>,
		name: impl Into<String>,
		connections: &[(&str, &str)],
	) {
		self.items.push(Item::Instance(Instance {
			module: module.into(),
			name: name.into(),
			connections: connections
				.iter()
				.map(|(port, signal)| (port.to_string(), signal.to_string()))
				.collect(),
		}));
	}

	pub fn assign(&mut self, target: impl Into<String>, expr: Expr) {
		self.items.push(Item::Assign(Assign {
			target: target.into(),
			range: None,
			expr,
		}));
	}

	pub fn assign_range(&mut self, target: impl Into<String>, range: BitRange, expr: Expr) {
		self.items.push(Item::Assign(Assign {
			target: target.into(),
			range: Some(range),
			expr,
		}));
	}

	pub fn wires(&self) -> impl Iterator<Item = &Wire> {
		self.items.iter().filter_map(|item| match item {
			Item::Wire(wire) => Some(wire),
			_ => None,
		})
	}

	pub fn registers(&self) -> impl Iterator<Item = &Register> {
		self.items.iter().filter_map(|item| match item {
			Item::Register(register) => Some(register),
			_ => None,
		})
	}

	pub fn instances(&self) -> impl Iterator<Item = &Instance> {
		self.items.iter().filter_map(|item| match item {
			Item::Instance(instance) => Some(instance),
			_ => None,
		})
	}

	pub fn assigns(&self) -> impl Iterator<Item = &Assign> {
		self.items.iter().filter_map(|item| match item {
			Item::Assign(assign) => Some(assign),
			_ => None,
		})
	}
}
