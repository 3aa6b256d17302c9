use gl_triangles::Scene;
use std::process::ExitCode;

fn main() -> ExitCode {
    gl_triangles::launch(Scene::rectangle())
}
