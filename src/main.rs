fn main() -> std::process::ExitCode {
    fabric_ci_lib::run()
}
