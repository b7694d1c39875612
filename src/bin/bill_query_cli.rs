use std::{env, process};

use bill_query::{
    cli::{self, output},
    init,
};

fn main() {
    init();

    let invocation = match cli::parse_args(env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    };

    if let Err(err) = cli::run(invocation) {
        output::error(err);
        process::exit(1);
    }
}
