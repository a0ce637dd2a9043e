//! 最小可运行示例：登记资料页路由，由控制器方法调用反推出可直接使用的链接。
//!
//! 运行：`cargo run -p linkto-routes --example profile_links`

use std::sync::Arc;

use linkto_core as linkto;

use linkto::http::HttpMethod;
use linkto_routes::{DefaultRoutes, RouteSpec, StaticRouter};

pub struct Profile;

#[linkto::controller]
impl Profile {
    /// 上传表单页。
    pub fn upload_form(&self) {}

    /// 接收上传的照片。
    pub fn save_photo(&self, album: u32, photo: &str) {
        let _ = (album, photo);
    }

    /// 查看相册中的某张照片。
    pub fn view_photo(&self, album: u32, photo: &str) {
        let _ = (album, photo);
    }

    /// 示例中故意不登记的动作。
    pub fn delete_account(&self) {}
}

fn main() {
    let routes = DefaultRoutes::new(Arc::new(
        StaticRouter::new()
            .with(RouteSpec::new(
                HttpMethod::Get,
                "/profile/upload",
                "Profile",
                "upload_form",
            ))
            .with(RouteSpec::new(
                HttpMethod::Post,
                "/profile/upload",
                "Profile",
                "save_photo",
            ))
            .with(RouteSpec::new(
                HttpMethod::Get,
                "/profile/album/{album}/photo/{photo}",
                "Profile",
                "view_photo",
            )),
    ));

    let upload = routes
        .resolve::<Profile, _>(|profile| profile.upload_form())
        .expect("upload_form 已登记");
    println!("上传表单页: {upload}");

    let save = routes
        .resolve::<Profile, _>(|profile| {
            profile.save_photo(7, "cover.png");
        })
        .expect("save_photo 已登记");
    println!("照片上传动作: {save}");

    let photo = routes
        .resolve::<Profile, _>(|profile| profile.view_photo(7, "cover.png"))
        .expect("view_photo 已登记");
    println!("相册照片页: {photo}");

    let methods = routes.allowed_methods_for("/profile/upload");
    println!("/profile/upload 接受的方法: {methods}");

    if let Err(error) = routes.resolve::<Profile, _>(|profile| profile.delete_account()) {
        println!("未登记动作如实报错: {error}");
    }
}
