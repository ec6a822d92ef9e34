use clap::{App, Arg};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn app() -> App<'static, 'static> {
    App::new("mdsite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mirrors a directory tree of markdown documents into a styled HTML site")
        .arg(
            Arg::with_name("input_dir")
                .help("Directory tree of markdown documents")
                .required(true),
        )
        .arg(
            Arg::with_name("output_dir")
                .help("Directory that receives the mirrored HTML tree")
                .required(true),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = app().get_matches();
    // both arguments are required, so clap has already rejected their absence
    let input = Path::new(matches.value_of("input_dir").unwrap());
    let output = Path::new(matches.value_of("output_dir").unwrap());

    if let Err(err) = mdsite::build::build_site(input, output) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
    println!("Conversion complete.");
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_wrong_argument_count_is_rejected() {
        assert!(app()
            .get_matches_from_safe(vec!["mdsite", "only-one"])
            .is_err());
        assert!(app().get_matches_from_safe(vec!["mdsite"]).is_err());
    }

    #[test]
    fn test_two_arguments_are_accepted() {
        let matches = app()
            .get_matches_from_safe(vec!["mdsite", "in", "out"])
            .unwrap();
        assert_eq!(Some("in"), matches.value_of("input_dir"));
        assert_eq!(Some("out"), matches.value_of("output_dir"));
    }
}
