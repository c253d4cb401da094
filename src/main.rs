fn main() {
    std::process::exit(apiquery::cli::run());
}
