//! `generate` argument parser
//!
//! Arguments are `<witInputPath> [<dartFilePath>]` followed by boolean flags
//! spelled `--<name>`, `--no-<name>` or `--[no-]<name>=true|false`. Each
//! flag may be given once. Errors cite the 0-based index of the offending
//! token and stop at the first problem.

use thiserror::Error;
use wit_dart_common::{GeneratorConfig, InputSource};

/// Expected shape of a flag token
pub const FLAG_SHAPE: &str = "Should be --<name>";
/// Expected shape of a flag value
pub const BOOL_SHAPE: &str = "Should be true or false.";
/// Name of the mandatory positional argument
pub const WIT_INPUT_PATH: &str = "witInputPath";

/// Parsed `generate` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub wit_input_path: String,
    pub dart_file_path: Option<String>,
    /// Regenerate whenever the inputs change
    pub watch: bool,
    pub config: GeneratorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("Invalid argument \"{token}\" at index {index}. {message}")]
    ArgumentFormat {
        index: usize,
        token: String,
        message: String,
    },

    #[error("Duplicate argument \"{token}\" at index {index}")]
    DuplicateArgument { index: usize, token: String },

    #[error("Missing positional argument: {name}")]
    MissingPositional { name: String },
}

impl ArgsError {
    fn format(index: usize, token: &str, message: impl Into<String>) -> Self {
        ArgsError::ArgumentFormat {
            index,
            token: token.to_string(),
            message: message.into(),
        }
    }
}

/// What a flag sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Watch,
    Default,
    JsonSerialization,
    CopyWith,
    EqualityAndHashCode,
    ToString,
    GenerateDocs,
    UseNullForOption,
    RequiredOption,
    TypedNumberLists,
    AsyncWorker,
    SameClassUnion,
}

/// Flag names and the field each one sets. `--no-<name>` sets the same field.
const FLAGS: &[(&str, Field)] = &[
    ("watch", Field::Watch),
    ("default", Field::Default),
    ("json-serialization", Field::JsonSerialization),
    ("copy-with", Field::CopyWith),
    ("equality-and-hash-code", Field::EqualityAndHashCode),
    ("to-string", Field::ToString),
    ("generate-docs", Field::GenerateDocs),
    ("use-null-for-option", Field::UseNullForOption),
    ("required-option", Field::RequiredOption),
    ("typed-number-lists", Field::TypedNumberLists),
    ("async-worker", Field::AsyncWorker),
    ("same-class-union", Field::SameClassUnion),
];

impl Field {
    /// The config toggle behind this field, `None` for parser-level flags.
    fn toggle(self, config: &mut GeneratorConfig) -> Option<&mut bool> {
        let toggle = match self {
            Field::Watch | Field::Default => return None,
            Field::JsonSerialization => &mut config.json_serialization,
            Field::CopyWith => &mut config.copy_with,
            Field::EqualityAndHashCode => &mut config.equality_and_hash_code,
            Field::ToString => &mut config.to_string,
            Field::GenerateDocs => &mut config.generate_docs,
            Field::UseNullForOption => &mut config.use_null_for_option,
            Field::RequiredOption => &mut config.required_option,
            Field::TypedNumberLists => &mut config.typed_number_lists,
            Field::AsyncWorker => &mut config.async_worker,
            Field::SameClassUnion => &mut config.same_class_union,
        };
        Some(toggle)
    }
}

/// Names of every config toggle a flag can set
pub fn toggle_names() -> impl Iterator<Item = &'static str> {
    FLAGS
        .iter()
        .filter(|(_, field)| !matches!(field, Field::Watch | Field::Default))
        .map(|(name, _)| *name)
}

/// Current value of the toggle set by `--<name>`.
pub fn toggle_value(config: &GeneratorConfig, name: &str) -> Option<bool> {
    let (_, field) = FLAGS.iter().find(|(flag, _)| *flag == name)?;
    let mut config = config.clone();
    field.toggle(&mut config).map(|value| *value)
}

pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<CliArgs, ArgsError> {
    let mut positionals: Vec<String> = Vec::new();
    let mut seen_flag = false;
    let mut values: Vec<Option<bool>> = vec![None; FLAGS.len()];

    for (index, token) in args.iter().map(AsRef::as_ref).enumerate() {
        if !token.starts_with('-') {
            if seen_flag || positionals.len() == 2 {
                return Err(ArgsError::format(index, token, FLAG_SHAPE));
            }
            positionals.push(token.to_string());
            continue;
        }
        seen_flag = true;

        let (slot, value) = parse_flag(index, token)?;
        if values[slot].is_some() {
            return Err(ArgsError::DuplicateArgument {
                index,
                token: token.to_string(),
            });
        }
        values[slot] = Some(value);
    }

    let mut positionals = positionals.into_iter();
    let wit_input_path = positionals.next().ok_or_else(|| ArgsError::MissingPositional {
        name: WIT_INPUT_PATH.to_string(),
    })?;
    let dart_file_path = positionals.next();

    let value_of = |wanted: Field| {
        FLAGS
            .iter()
            .zip(&values)
            .find(|((_, field), _)| *field == wanted)
            .and_then(|(_, value)| *value)
    };
    let inputs = InputSource::path(&wit_input_path);
    let mut config = match value_of(Field::Default) {
        Some(false) => GeneratorConfig::all_disabled(inputs),
        _ => GeneratorConfig::new(inputs),
    };
    for ((_, field), value) in FLAGS.iter().zip(&values) {
        if let (Some(value), Some(toggle)) = (value, field.toggle(&mut config)) {
            *toggle = *value;
        }
    }

    Ok(CliArgs {
        wit_input_path,
        dart_file_path,
        watch: value_of(Field::Watch).unwrap_or(false),
        config,
    })
}

/// Split a flag token into its table slot and value.
fn parse_flag(index: usize, token: &str) -> Result<(usize, bool), ArgsError> {
    let Some(body) = token.strip_prefix("--") else {
        return Err(ArgsError::format(index, token, FLAG_SHAPE));
    };
    let (name, explicit) = match body.split_once('=') {
        Some((name, "true")) => (name, Some(true)),
        Some((name, "false")) => (name, Some(false)),
        Some(_) => return Err(ArgsError::format(index, token, BOOL_SHAPE)),
        None => (body, None),
    };
    if !is_flag_name(name) {
        return Err(ArgsError::format(index, token, FLAG_SHAPE));
    }

    let (base, negated) = match name.strip_prefix("no-") {
        Some(base) => (base, true),
        None => (name, false),
    };
    let Some(slot) = FLAGS.iter().position(|(flag, _)| *flag == base) else {
        let known: Vec<&str> = FLAGS.iter().map(|(flag, _)| *flag).collect();
        return Err(ArgsError::format(
            index,
            token,
            format!(
                "Unknown argument \"{name}\". Should be one of: {}",
                known.join(", ")
            ),
        ));
    };
    Ok((slot, explicit.unwrap_or(true) != negated))
}

fn is_flag_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Arguments that parse back to `args`.
///
/// Only what the flags can express is kept: every toggle is written out
/// after `--no-default`.
pub fn serialize_args(args: &CliArgs) -> Vec<String> {
    let mut out = vec![args.wit_input_path.clone()];
    out.extend(args.dart_file_path.clone());
    if args.watch {
        out.push("--watch".to_string());
    }
    out.push("--no-default".to_string());
    for name in toggle_names() {
        if toggle_value(&args.config, name) == Some(true) {
            out.push(format!("--{name}"));
        }
    }
    out
}
