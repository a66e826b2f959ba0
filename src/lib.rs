//! Makegen core library.
//!
//! Build scripts written in YAML are parsed by [`manifest`], evaluated step
//! by step by [`dsl::evaluate`] into a [`model::BuildModel`] and rendered as
//! Makefile text by [`makefile_gen::render`]. The [`runner`] ties these
//! together for the command line.
//!
//! ```
//! use makegen::{dsl, makefile_gen, manifest, model::BuildModel};
//!
//! let script = manifest::from_str(
//!     "makegen_version: \"1.0.0\"\nsteps:\n  - rule: { name: main, deps: main.c, steps: [{ compile: [] }] }\n",
//! )
//! .expect("parse");
//! let mut model = BuildModel::new();
//! dsl::evaluate(script, &mut model).expect("evaluate");
//! assert!(makefile_gen::render(&model).contains("main: main.c\n\t$(CC) $(FLAGS)  main.c \n"));
//! ```

pub mod alias;
pub mod ast;
pub mod cli;
pub mod dsl;
pub mod makefile_gen;
pub mod manifest;
pub mod model;
pub mod runner;
pub mod token;
