use chrono::Utc;

fn main() {
    // Record build time for the status endpoint / 记录构建时间供状态接口使用
    let build_time = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    println!("cargo:rustc-env=BUILD_TIME={}", build_time);

    println!("cargo:rerun-if-changed=build.rs");
}
