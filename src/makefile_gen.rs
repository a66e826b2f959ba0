//! Makefile generator.
//!
//! This module converts a [`BuildModel`] into Makefile text. Output follows
//! declaration order throughout, so rendering the same model always yields
//! the same bytes.

use crate::model::{BuildModel, Compilation, Rule, SuffixPair};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Tool name written in the trailing comment.
pub const GENERATOR: &str = "makegen";

/// Generate a Makefile as a string.
///
/// ```
/// use makegen::{makefile_gen, model::BuildModel};
///
/// let text = makefile_gen::render(&BuildModel::new());
/// assert_eq!(text, "\nCC = gcc\nFLAGS = \n\n# Generated by makegen\n");
/// ```
#[must_use]
pub fn render(model: &BuildModel) -> String {
    Makefile(model).to_string()
}

/// Wrapper struct to display a whole model.
struct Makefile<'a>(&'a BuildModel);

impl Display for Makefile<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let model = self.0;
        for comment in &model.comments {
            writeln!(f, "# {comment}")?;
        }
        writeln!(f)?;
        for (key, value) in model.variables.iter() {
            writeln!(f, "{key} = {}", value.render())?;
        }
        for pair in &model.suffixes {
            write!(f, "{}", DisplaySuffix(pair))?;
        }
        for rule in &model.rules {
            write!(f, "{}", DisplayRule(rule))?;
        }
        write!(f, "\n# Generated by {GENERATOR}\n")
    }
}

struct DisplaySuffix<'a>(&'a SuffixPair);

impl Display for DisplaySuffix<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "\n.SUFFIXES: {} {}\n", self.0.target, self.0.source)
    }
}

/// Wrapper struct to display a rule with its recipe.
struct DisplayRule<'a>(&'a Rule);

impl Display for DisplayRule<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = self.0;
        writeln!(f)?;
        for comment in &rule.comments {
            writeln!(f, "# {comment}")?;
        }
        writeln!(f, "{}: {}", rule.name, rule.dependencies.iter().join(" "))?;
        for compilation in &rule.compilations {
            write!(f, "{}", DisplayCompilation(compilation))?;
        }
        for command in &rule.shells {
            writeln!(f, "\t{command}")?;
        }
        Ok(())
    }
}

struct DisplayCompilation<'a>(&'a Compilation);

impl Display for DisplayCompilation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Compilation {
            compiler,
            flags,
            input,
            output,
        } = self.0;
        writeln!(
            f,
            "\t{compiler} $(FLAGS) {} {input} {output}",
            flags.iter().join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::CompileArg;
    use crate::model::VarValue;
    use crate::token::Token;
    use rstest::{fixture, rstest};

    #[fixture]
    fn model() -> BuildModel {
        BuildModel::new()
    }

    #[rstest]
    fn renders_seeded_model(model: BuildModel) {
        let expected = concat!("\n", "CC = gcc\n", "FLAGS = \n", "\n", "# Generated by makegen\n");
        assert_eq!(render(&model), expected);
    }

    #[rstest]
    fn renders_compile_rule(mut model: BuildModel) {
        model
            .open_rule("main", ["main.c", "util.h"].map(Token::literal), |rule| {
                rule.compile([]);
                Ok(())
            })
            .expect("populate");
        let expected = concat!(
            "\n",
            "CC = gcc\n",
            "FLAGS = \n",
            "\n",
            "main: main.c util.h\n",
            "\t$(CC) $(FLAGS)  main.c \n",
            "\n",
            "# Generated by makegen\n",
        );
        assert_eq!(render(&model), expected);
    }

    #[rstest]
    fn renders_every_section_in_order(mut model: BuildModel) {
        model.comment(["Thread package", "second line"]);
        model.declare_variable(
            "OFILES",
            vec![Token::literal("a.o"), Token::symbol("EXTRA")],
        );
        model.suffix(".o", ".c", "gcc -c $< -o $@");
        model
            .open_rule("$(OUT)", [Token::symbol("OFILES")], |rule| {
                rule.comment(["link step"]);
                rule.compile([
                    CompileArg::Flag(Token::parse(":debug")),
                    CompileArg::Flag(Token::parse(":out")),
                ]);
                rule.shell([Token::parse(":silent"), Token::literal("strip $@")]);
                Ok(())
            })
            .expect("populate");
        model.clean([Token::literal("*.o")]);

        let expected = concat!(
            "# Thread package\n",
            "# second line\n",
            "\n",
            "CC = gcc\n",
            "FLAGS = \n",
            "OFILES = a.o $(EXTRA)\n",
            "\n",
            ".SUFFIXES: .o .c\n",
            "\n",
            ".c.o: \n",
            "\tgcc -c $< -o $@\n",
            "\n",
            "# link step\n",
            "$(OUT): $(OFILES)\n",
            "\t$(CC) $(FLAGS) -g $(OFILES) -o $@\n",
            "\t@strip $@\n",
            "\n",
            "clean: \n",
            "\t-rm -rf *.o\n",
            "\n",
            "# Generated by makegen\n",
        );
        assert_eq!(render(&model), expected);
    }

    #[rstest]
    fn redefined_default_keeps_its_slot(mut model: BuildModel) {
        model.declare_variable("OUT", "app");
        model.declare_variable("CC", VarValue::from("clang"));
        let text = render(&model);
        assert!(text.starts_with("\nCC = clang\nFLAGS = \nOUT = app\n"), "{text}");
    }

    #[rstest]
    fn rendering_is_deterministic(mut model: BuildModel) {
        model.declare_variable("A", "1");
        model.clean([Token::literal("x")]);
        assert_eq!(render(&model), render(&model));
    }
}
