fn main() {
    swiftpen::cli::run();
}
