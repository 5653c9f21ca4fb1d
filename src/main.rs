use structopt::StructOpt;
use urm::cli::command;

fn main() {
    env_logger::init();
    command::terminal_init();
    command::root(command::CommandRoot::from_args());
}
