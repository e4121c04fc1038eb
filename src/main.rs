fn main() {
    ratelink::cli::run();
}
