use structopt::StructOpt;
use urm::cli::command;

fn main() {
    env_logger::init();
    command::terminal_init();
    command::run(command::SubcommandRun::from_args());
}
