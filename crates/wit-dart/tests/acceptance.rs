use cucumber::{given, then, when, World};
use wit_dart::args::{parse_args, serialize_args, toggle_value, ArgsError, CliArgs};

#[derive(Debug, Default, World)]
pub struct ArgsWorld {
    args: Vec<String>,
    result: Option<Result<CliArgs, ArgsError>>,
}

impl ArgsWorld {
    fn parsed(&self) -> &CliArgs {
        match &self.result {
            Some(Ok(args)) => args,
            other => panic!("expected parsed arguments, got {other:?}"),
        }
    }

    fn error(&self) -> &ArgsError {
        match &self.result {
            Some(Err(err)) => err,
            other => panic!("expected an error, got {other:?}"),
        }
    }
}

#[given(expr = "the arguments {string}")]
async fn the_arguments(w: &mut ArgsWorld, args: String) {
    w.args = args.split_whitespace().map(str::to_string).collect();
}

#[when("I parse the arguments")]
async fn parse_the_arguments(w: &mut ArgsWorld) {
    w.result = Some(parse_args(&w.args));
}

#[then("parsing succeeds")]
async fn parsing_succeeds(w: &mut ArgsWorld) {
    w.parsed();
}

#[then(expr = "parsing fails with a duplicate argument at index {int} for {string}")]
async fn fails_with_duplicate(w: &mut ArgsWorld, index: usize, token: String) {
    assert_eq!(w.error(), &ArgsError::DuplicateArgument { index, token });
}

#[then(expr = "parsing fails at index {int} with {string}")]
async fn fails_with_format(w: &mut ArgsWorld, expected_index: usize, expected: String) {
    let ArgsError::ArgumentFormat { index, message, .. } = w.error() else {
        panic!("expected a format error, got {:?}", w.error());
    };
    assert_eq!(*index, expected_index);
    assert_eq!(message, &expected);
}

#[then(expr = "parsing fails with the missing positional {string}")]
async fn fails_with_missing(w: &mut ArgsWorld, name: String) {
    assert_eq!(w.error(), &ArgsError::MissingPositional { name });
}

#[then(expr = "{string} is {word}")]
async fn toggle_is(w: &mut ArgsWorld, name: String, state: String) {
    let expected = match state.as_str() {
        "enabled" => true,
        "disabled" => false,
        other => panic!("unknown state {other}"),
    };
    assert_eq!(toggle_value(&w.parsed().config, &name), Some(expected));
}

#[then(expr = "the output path is {string}")]
async fn output_path_is(w: &mut ArgsWorld, path: String) {
    assert_eq!(w.parsed().dart_file_path.as_deref(), Some(path.as_str()));
}

#[then("watch mode is on")]
async fn watch_mode_is_on(w: &mut ArgsWorld) {
    assert!(w.parsed().watch);
}

#[then("serializing and parsing again gives the same arguments")]
async fn round_trip(w: &mut ArgsWorld) {
    let parsed = w.parsed().clone();
    assert_eq!(parse_args(&serialize_args(&parsed)), Ok(parsed));
}

#[tokio::main]
async fn main() {
    ArgsWorld::run("tests/features").await;
}
