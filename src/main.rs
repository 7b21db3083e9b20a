fn main() {
    collabnet::cli::run();
}
