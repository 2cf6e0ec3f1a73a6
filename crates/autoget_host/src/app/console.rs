use std::collections::HashMap;

use autoget::{AutogetEngine, AutogetItem, CommandOutcome, ConfirmationPrompt, ItemAction};

use super::catalog::{CatalogItem, CatalogRules, ItemCatalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HostCommand {
    Help,
    Items,
    Pickup { blueprint: String },
    Menu { blueprint: String },
    Fire { command_id: String, blueprint: String },
    Disable { blueprint: String },
    Enable { blueprint: String },
    List,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommandParseError {
    reason: String,
    usage: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionControl {
    Continue,
    Quit,
}

type ParseFn = fn(&[String]) -> Result<HostCommand, CommandParseError>;

struct CommandSpec {
    name: &'static str,
    help: &'static str,
    arg_schema: &'static str,
    parse: ParseFn,
}

pub(crate) struct HostCommandRegistry {
    specs: Vec<CommandSpec>,
    lookup_by_lower_name: HashMap<String, usize>,
}

impl HostCommandRegistry {
    pub(crate) fn with_builtins() -> Self {
        let mut registry = Self {
            specs: Vec::new(),
            lookup_by_lower_name: HashMap::new(),
        };
        registry.register("help", "List commands", "", parse_help);
        registry.register("items", "List catalog blueprints", "", parse_items);
        registry.register(
            "pickup",
            "Ask whether an item would be auto-picked up",
            "<blueprint>",
            parse_pickup,
        );
        registry.register(
            "menu",
            "Show the auto-pickup action for an item",
            "<blueprint>",
            parse_menu,
        );
        registry.register(
            "fire",
            "Fire an item command by id",
            "<command_id> <blueprint>",
            parse_fire,
        );
        registry.register(
            "disable",
            "Disable auto-pickup for a blueprint",
            "<blueprint>",
            parse_disable,
        );
        registry.register(
            "enable",
            "Re-enable auto-pickup for a blueprint",
            "<blueprint>",
            parse_enable,
        );
        registry.register("list", "List disabled blueprints", "", parse_list);
        registry.register("quit", "Exit", "", parse_quit);
        registry
    }

    fn register(
        &mut self,
        name: &'static str,
        help: &'static str,
        arg_schema: &'static str,
        parse: ParseFn,
    ) {
        self.lookup_by_lower_name
            .insert(name.to_ascii_lowercase(), self.specs.len());
        self.specs.push(CommandSpec {
            name,
            help,
            arg_schema,
            parse,
        });
    }

    fn lookup(&self, input_name: &str) -> Option<&CommandSpec> {
        let index = self
            .lookup_by_lower_name
            .get(&input_name.to_ascii_lowercase())?;
        self.specs.get(*index)
    }

    fn help_lines(&self) -> Vec<String> {
        self.specs
            .iter()
            .map(|spec| {
                if spec.arg_schema.is_empty() {
                    format!("{} - {}", spec.name, spec.help)
                } else {
                    format!("{} {} - {}", spec.name, spec.arg_schema, spec.help)
                }
            })
            .collect()
    }

    /// `Ok(None)` for blank lines; `Err` carries a printable message.
    pub(crate) fn parse_line(&self, raw_line: &str) -> Result<Option<HostCommand>, String> {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let tokens =
            tokenize_line(trimmed).map_err(|reason| format!("error: {reason}. usage: help"))?;
        let Some((command_name, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let spec = self
            .lookup(command_name)
            .ok_or_else(|| format!("error: unknown command '{command_name}'. try: help"))?;
        (spec.parse)(args)
            .map(Some)
            .map_err(|error| format!("error: {}. usage: {}", error.reason, error.usage))
    }
}

pub(crate) struct HostSession<P> {
    pub(crate) engine: AutogetEngine<CatalogRules, P>,
    pub(crate) catalog: ItemCatalog,
    registry: HostCommandRegistry,
}

impl<P: ConfirmationPrompt> HostSession<P> {
    pub(crate) fn new(engine: AutogetEngine<CatalogRules, P>, catalog: ItemCatalog) -> Self {
        Self {
            engine,
            catalog,
            registry: HostCommandRegistry::with_builtins(),
        }
    }

    pub(crate) fn process_line(
        &mut self,
        raw_line: &str,
        out: &mut Vec<String>,
    ) -> SessionControl {
        match self.registry.parse_line(raw_line) {
            Ok(Some(command)) => self.execute(command, out),
            Ok(None) => SessionControl::Continue,
            Err(message) => {
                out.push(message);
                SessionControl::Continue
            }
        }
    }

    fn execute(&mut self, command: HostCommand, out: &mut Vec<String>) -> SessionControl {
        match command {
            HostCommand::Help => out.extend(self.registry.help_lines()),
            HostCommand::Items => {
                if self.catalog.items().is_empty() {
                    out.push("catalog is empty".to_string());
                }
                for item in self.catalog.items() {
                    out.push(format!("{} ({})", item.blueprint(), item.display_name()));
                }
            }
            HostCommand::Pickup { blueprint } => {
                if let Some(item) = self.item_or_report(&blueprint, out) {
                    let pickup = self.engine.decide_pickup(item);
                    out.push(format!("pickup {blueprint}: {}", yes_no(pickup)));
                }
            }
            HostCommand::Menu { blueprint } => {
                if let Some(item) = self.item_or_report(&blueprint, out) {
                    let actions = self.engine.populate_actions(item);
                    if actions.is_empty() {
                        out.push(format!("menu {blueprint}: no auto-pickup action"));
                    }
                    for action in actions {
                        out.push(format_action(&blueprint, &action));
                    }
                }
            }
            HostCommand::Fire {
                command_id,
                blueprint,
            } => self.fire(&command_id, &blueprint, out),
            HostCommand::Disable { blueprint } => {
                self.fire(ItemAction::DISABLE.command_id(), &blueprint, out)
            }
            HostCommand::Enable { blueprint } => {
                self.fire(ItemAction::ENABLE.command_id(), &blueprint, out)
            }
            HostCommand::List => {
                let disabled: Vec<&str> = self.engine.store().disabled_blueprints().collect();
                if disabled.is_empty() {
                    out.push("no blueprints disabled".to_string());
                }
                out.extend(
                    disabled
                        .into_iter()
                        .map(|blueprint| format!("disabled: {blueprint}")),
                );
            }
            HostCommand::Quit => return SessionControl::Quit,
        }
        SessionControl::Continue
    }

    fn fire(&mut self, command_id: &str, blueprint: &str, out: &mut Vec<String>) {
        let Some(item) = self.catalog.get(blueprint) else {
            out.push(format!("error: unknown blueprint '{blueprint}'"));
            return;
        };
        match self.engine.handle_command(command_id, item) {
            Ok(CommandOutcome::Disabled) => {
                out.push(format!("auto-pickup disabled for {blueprint}"))
            }
            Ok(CommandOutcome::Declined) => out.push("left unchanged".to_string()),
            Ok(CommandOutcome::Enabled) => {
                out.push(format!("auto-pickup re-enabled for {blueprint}"))
            }
            Ok(CommandOutcome::Ignored) => out.push(format!("ignored command '{command_id}'")),
            Err(error) => out.push(format!("error: {error}")),
        }
    }

    fn item_or_report<'a>(
        &'a self,
        blueprint: &str,
        out: &mut Vec<String>,
    ) -> Option<&'a CatalogItem> {
        let item = self.catalog.get(blueprint);
        if item.is_none() {
            out.push(format!("error: unknown blueprint '{blueprint}'"));
        }
        item
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn format_action(blueprint: &str, action: &ItemAction) -> String {
    format!(
        "menu {blueprint}: {} [{}] -> {}",
        action.label,
        action.key_label,
        action.command_id()
    )
}

fn tokenize_line(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut pending = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                pending = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if pending {
                    tokens.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            _ => {
                current.push(ch);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quoted string".to_string());
    }
    if pending {
        tokens.push(current);
    }
    Ok(tokens)
}

fn parse_help(args: &[String]) -> Result<HostCommand, CommandParseError> {
    require_no_args(args, "help")?;
    Ok(HostCommand::Help)
}

fn parse_items(args: &[String]) -> Result<HostCommand, CommandParseError> {
    require_no_args(args, "items")?;
    Ok(HostCommand::Items)
}

fn parse_list(args: &[String]) -> Result<HostCommand, CommandParseError> {
    require_no_args(args, "list")?;
    Ok(HostCommand::List)
}

fn parse_quit(args: &[String]) -> Result<HostCommand, CommandParseError> {
    require_no_args(args, "quit")?;
    Ok(HostCommand::Quit)
}

fn parse_pickup(args: &[String]) -> Result<HostCommand, CommandParseError> {
    let blueprint = require_blueprint(args, "pickup <blueprint>")?;
    Ok(HostCommand::Pickup { blueprint })
}

fn parse_menu(args: &[String]) -> Result<HostCommand, CommandParseError> {
    let blueprint = require_blueprint(args, "menu <blueprint>")?;
    Ok(HostCommand::Menu { blueprint })
}

fn parse_disable(args: &[String]) -> Result<HostCommand, CommandParseError> {
    let blueprint = require_blueprint(args, "disable <blueprint>")?;
    Ok(HostCommand::Disable { blueprint })
}

fn parse_enable(args: &[String]) -> Result<HostCommand, CommandParseError> {
    let blueprint = require_blueprint(args, "enable <blueprint>")?;
    Ok(HostCommand::Enable { blueprint })
}

fn parse_fire(args: &[String]) -> Result<HostCommand, CommandParseError> {
    match args {
        [command_id, blueprint] => Ok(HostCommand::Fire {
            command_id: command_id.clone(),
            blueprint: blueprint.clone(),
        }),
        _ => Err(CommandParseError {
            reason: "expected <command_id> <blueprint>".to_string(),
            usage: "fire <command_id> <blueprint>".to_string(),
        }),
    }
}

fn require_blueprint(args: &[String], usage: &str) -> Result<String, CommandParseError> {
    match args {
        [blueprint] => Ok(blueprint.clone()),
        _ => Err(CommandParseError {
            reason: "expected exactly one argument <blueprint>".to_string(),
            usage: usage.to_string(),
        }),
    }
}

fn require_no_args(args: &[String], usage: &str) -> Result<(), CommandParseError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandParseError {
            reason: "unexpected extra arguments".to_string(),
            usage: usage.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use autoget::{GlobalToggles, OverrideStore, PromptAnswer};

    use super::super::catalog::CatalogFile;
    use super::*;

    struct QueuedPrompt(VecDeque<PromptAnswer>);

    impl ConfirmationPrompt for QueuedPrompt {
        fn ask_yes_no(&mut self, _message: &str) -> PromptAnswer {
            self.0.pop_front().unwrap_or(PromptAnswer::No)
        }
    }

    fn session(answers: &[PromptAnswer]) -> HostSession<QueuedPrompt> {
        let file: CatalogFile = serde_json::from_str(
            r#"{"items": [
                {"blueprint": "Wand-1", "display_name": "wand", "complexity": 2},
                {"blueprint": "Rusty Spoon", "weight": 1.0},
                {"blueprint": "Gold Nugget", "tags": ["Nugget"], "identified": false}
            ]}"#,
        )
        .expect("catalog");
        let toggles = GlobalToggles {
            autoget_artifacts: true,
            autoget_nuggets: true,
            ..GlobalToggles::default()
        };
        let engine = AutogetEngine::new(
            OverrideStore::in_memory(),
            toggles,
            CatalogRules,
            QueuedPrompt(answers.iter().copied().collect()),
        );
        HostSession::new(engine, ItemCatalog::from_items(file.items))
    }

    fn run(session: &mut HostSession<QueuedPrompt>, line: &str) -> Vec<String> {
        let mut out = Vec::new();
        session.process_line(line, &mut out);
        out
    }

    #[test]
    fn help_lists_commands_in_registration_order() {
        let lines = run(&mut session(&[]), "help");
        assert_eq!(lines[0], "help - List commands");
        assert_eq!(
            lines[2],
            "pickup <blueprint> - Ask whether an item would be auto-picked up"
        );
        assert_eq!(lines.last().map(String::as_str), Some("quit - Exit"));
    }

    #[test]
    fn unknown_command_and_bad_args_report_usage() {
        let mut session = session(&[]);
        assert_eq!(
            run(&mut session, "nope"),
            vec!["error: unknown command 'nope'. try: help"]
        );
        assert_eq!(
            run(&mut session, "menu"),
            vec!["error: expected exactly one argument <blueprint>. usage: menu <blueprint>"]
        );
        assert_eq!(
            run(&mut session, "pickup Lantern"),
            vec!["error: unknown blueprint 'Lantern'"]
        );
    }

    #[test]
    fn disable_flow_through_console() {
        let mut session = session(&[PromptAnswer::Cancel, PromptAnswer::Yes]);
        assert_eq!(run(&mut session, "pickup Wand-1"), vec!["pickup Wand-1: yes"]);
        assert_eq!(
            run(&mut session, "MENU Wand-1"),
            vec![
                "menu Wand-1: Disable auto-pickup for this item [disable auto-pickup] -> QudUX_DisableItemAutoget"
            ]
        );
        assert_eq!(
            run(&mut session, "fire QudUX_DisableItemAutoget Wand-1"),
            vec!["auto-pickup disabled for Wand-1"]
        );
        assert_eq!(run(&mut session, "pickup Wand-1"), vec!["pickup Wand-1: no"]);
        assert_eq!(run(&mut session, "list"), vec!["disabled: Wand-1"]);
        assert_eq!(
            run(&mut session, "enable Wand-1"),
            vec!["auto-pickup re-enabled for Wand-1"]
        );
        assert_eq!(run(&mut session, "list"), vec!["no blueprints disabled"]);
    }

    #[test]
    fn declined_disable_and_unknown_command_ids() {
        let mut session = session(&[PromptAnswer::No]);
        assert_eq!(run(&mut session, "disable Wand-1"), vec!["left unchanged"]);
        assert_eq!(
            run(&mut session, "fire Eat Wand-1"),
            vec!["ignored command 'Eat'"]
        );
        assert!(session.engine.store().is_empty());
    }

    #[test]
    fn quoted_blueprints_and_items_without_actions() {
        let mut session = session(&[]);
        assert_eq!(
            run(&mut session, "menu \"Rusty Spoon\""),
            vec!["menu Rusty Spoon: no auto-pickup action"]
        );
        assert_eq!(
            run(&mut session, "menu \"Gold Nugget\""),
            vec!["menu Gold Nugget: no auto-pickup action"]
        );
        assert_eq!(
            run(&mut session, "menu \"Gold"),
            vec!["error: unterminated quoted string. usage: help"]
        );
    }

    #[test]
    fn quit_stops_the_session() {
        let mut session = session(&[]);
        let mut out = Vec::new();
        assert_eq!(session.process_line("quit", &mut out), SessionControl::Quit);
        assert_eq!(session.process_line("   ", &mut out), SessionControl::Continue);
        assert!(out.is_empty());
    }

    #[test]
    fn tokenizer_keeps_empty_quoted_tokens() {
        assert_eq!(
            tokenize_line("fire \"\" Wand-1").expect("tokens"),
            vec!["fire", "", "Wand-1"]
        );
    }
}
