fn main() {
    let udl_file = "./src/poststrat.udl";

    println!("cargo:rerun-if-changed={}", udl_file);

    uniffi::generate_scaffolding(udl_file).unwrap();
}
