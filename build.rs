//! Build script para generar recursos de Windows

fn main() {
    // Solo generar recursos en Windows
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }

    let mut res = winres::WindowsResource::new();

    // Información del producto
    res.set("ProductName", "KeepAwake")
        .set("FileDescription", "Evita que Windows entre en reposo")
        .set("OriginalFilename", "keep-awake.exe")
        .set("InternalName", "KeepAwake")
        .set("Comments", "https://github.com/potapotapotato");

    // Versión del archivo y del producto (leer de Cargo.toml)
    let version = env!("CARGO_PKG_VERSION");
    res.set("ProductVersion", version)
        .set("FileVersion", version);

    // Compilar recursos
    if let Err(e) = res.compile() {
        println!("cargo:warning=Error compilando recursos de Windows: {}", e);
    }
}
