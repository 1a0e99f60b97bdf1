fn main() {
    if let Err(err) = mindmap_rs_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
