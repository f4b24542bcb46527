use voxelgen::cli::CommandLineInterface;

fn main() {
    let command_line_interface = CommandLineInterface::load();
    voxelgen::init_tracing(command_line_interface.log_level());
    if let Err(error) = command_line_interface.run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
