use std::fmt::Write;

use crate::commands::{init, schema};

#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct CommandExample {
    pub name: &'static str,
    pub groups: &'static [ExampleGroup],
}

impl CommandExample {
    /// Plain-text `Examples:` block for the subcommand's long help.
    pub fn render(&self) -> String {
        let mut buffer = String::from("Examples:\n");
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                buffer.push('\n');
            }
            let _ = writeln!(buffer, "  {}", group.title);
            for command in group.commands {
                let _ = writeln!(buffer, "    {command}");
            }
        }
        buffer
    }
}

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("RUST_LOG", "log filter, e.g. domo=debug"),
    ("<any>", "config.toml values written as ${VAR} are read from the environment"),
];

pub fn command_examples() -> &'static [CommandExample] {
    &[
        CommandExample {
            name: "init",
            groups: init::EXAMPLES,
        },
        CommandExample {
            name: "schema",
            groups: schema::EXAMPLES,
        },
    ]
}

/// Top-level long help appendix.
pub fn environment_help() -> String {
    let mut buffer = String::from("Environment:\n");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let _ = writeln!(buffer, "  {key:<10} {description}");
    }
    buffer.push_str("\nRun 'domo <command> --help' for examples.\n");
    buffer
}
