use glam::{Mat4, Vec3};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as GL, WebGlContextAttributes,
    WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::app::FrameRenderer;
use crate::camera::PerspectiveCamera;
use crate::error::SceneError;
use crate::scene::Scene;
use crate::viewport::Viewport;

const SPRITE_VS: &str = r#"#version 300 es
layout(location = 0) in vec2 a_position;
layout(location = 1) in vec2 a_uv;
uniform mat4 u_view_proj;
uniform mat4 u_model;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = u_view_proj * u_model * vec4(a_position, 0.0, 1.0);
}
"#;

const SPRITE_FS: &str = r#"#version 300 es
precision mediump float;
in vec2 v_uv;
uniform sampler2D u_map;
uniform vec3 u_color;
uniform vec3 u_light;
out vec4 out_color;
void main() {
    vec4 texel = texture(u_map, v_uv);
    out_color = vec4(u_color * u_light * texel.rgb, texel.a);
}
"#;

const LINE_VS: &str = r#"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_color;
uniform mat4 u_view_proj;
out vec3 v_color;
void main() {
    v_color = a_color;
    gl_Position = u_view_proj * vec4(a_position, 1.0);
}
"#;

const LINE_FS: &str = r#"#version 300 es
precision mediump float;
in vec3 v_color;
out vec4 out_color;
void main() {
    out_color = vec4(v_color, 1.0);
}
"#;

/// Unit quad centred on the origin in the xy plane: position.xy, uv.
#[rustfmt::skip]
const QUAD: [f32; 24] = [
    -0.5, -0.5, 0.0, 0.0,
     0.5, -0.5, 1.0, 0.0,
     0.5,  0.5, 1.0, 1.0,
    -0.5, -0.5, 0.0, 0.0,
     0.5,  0.5, 1.0, 1.0,
    -0.5,  0.5, 0.0, 1.0,
];

struct SpriteProgram {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    u_view_proj: WebGlUniformLocation,
    u_model: WebGlUniformLocation,
    u_map: WebGlUniformLocation,
    u_color: WebGlUniformLocation,
    u_light: WebGlUniformLocation,
}

struct AxesProgram {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    u_view_proj: WebGlUniformLocation,
}

/// WebGL2 backend drawing the smoke sprites and the axes helper.
pub struct WebGlRenderer {
    canvas: HtmlCanvasElement,
    gl: GL,
    sprites: SpriteProgram,
    axes: Option<AxesProgram>,
    texture: WebGlTexture,
    surface: Viewport,
}

impl WebGlRenderer {
    /// Acquire a WebGL2 context on `canvas` (alpha, antialias), build the
    /// programs, and start fetching `texture_url`.
    pub fn new(
        canvas: HtmlCanvasElement,
        texture_url: &str,
        axes_length: f32,
    ) -> Result<Self, SceneError> {
        let attrs = WebGlContextAttributes::new();
        attrs.set_alpha(true);
        attrs.set_antialias(true);
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &attrs)?
            .ok_or(SceneError::WebGlUnavailable)?
            .dyn_into()
            .map_err(|_| SceneError::WebGlUnavailable)?;

        let sprites = SpriteProgram::new(&gl)?;
        let axes = if axes_length > 0.0 {
            Some(AxesProgram::new(&gl, axes_length)?)
        } else {
            None
        };
        let texture = load_texture(&gl, texture_url)?;

        Ok(Self {
            canvas,
            gl,
            sprites,
            axes,
            texture,
            surface: Viewport::new(1, 1, 1.0, f64::MAX),
        })
    }

    fn apply_size(&self) {
        let (w, h) = self.surface.drawing_buffer_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        let css = [
            ("width", format!("{}px", self.surface.width)),
            ("height", format!("{}px", self.surface.height)),
        ];
        for (name, value) in css {
            if let Err(e) = style.set_property(name, &value) {
                log::warn!("canvas style {name}: {e:?}");
            }
        }
    }

    fn draw_axes(&self, view_proj: &Mat4) {
        let Some(axes) = &self.axes else { return };
        let gl = &self.gl;
        gl.use_program(Some(&axes.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&axes.u_view_proj), false, &view_proj.to_cols_array());
        gl.bind_vertex_array(Some(&axes.vao));
        gl.draw_arrays(GL::LINES, 0, 6);
    }

    fn draw_smoke(&self, scene: &Scene, camera: &PerspectiveCamera, view_proj: &Mat4) {
        let gl = &self.gl;
        let s = &self.sprites;
        gl.use_program(Some(&s.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&s.u_view_proj), false, &view_proj.to_cols_array());
        gl.uniform3fv_with_f32_array(Some(&s.u_color), &scene.material.color.to_array());
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.uniform1i(Some(&s.u_map), 0);
        gl.bind_vertex_array(Some(&s.vao));

        if scene.material.transparent {
            gl.enable(GL::BLEND);
            gl.blend_func(GL::SRC_ALPHA, GL::ONE_MINUS_SRC_ALPHA);
            gl.depth_mask(false);
        }

        let field = &scene.smoke;
        let size = field.plane_size();
        for i in field.back_to_front(&camera.view_matrix()) {
            let model = field.particles()[i].model_matrix(size);
            let normal = model.z_axis.truncate().normalize_or(Vec3::Z);
            let light = scene.lights.irradiance(normal);
            gl.uniform_matrix4fv_with_f32_array(Some(&s.u_model), false, &model.to_cols_array());
            gl.uniform3fv_with_f32_array(Some(&s.u_light), &light.to_array());
            gl.draw_arrays(GL::TRIANGLES, 0, 6);
        }

        gl.depth_mask(true);
        gl.disable(GL::BLEND);
    }
}

impl FrameRenderer for WebGlRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.surface.width = width;
        self.surface.height = height;
        self.apply_size();
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.surface.pixel_ratio = ratio;
        self.apply_size();
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError> {
        let gl = &self.gl;
        let (w, h) = self.surface.drawing_buffer_size();
        gl.viewport(0, 0, w as i32, h as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
        gl.enable(GL::DEPTH_TEST);

        let view_proj = camera.view_projection();
        self.draw_axes(&view_proj);
        self.draw_smoke(scene, camera, &view_proj);

        if gl.is_context_lost() {
            return Err(SceneError::WebGlUnavailable);
        }
        Ok(())
    }
}

impl SpriteProgram {
    fn new(gl: &GL) -> Result<Self, SceneError> {
        let program = link_program(gl, SPRITE_VS, SPRITE_FS)?;
        let vao = upload_vertices(gl, &QUAD, &[2, 2])?;
        Ok(Self {
            u_view_proj: uniform(gl, &program, "u_view_proj")?,
            u_model: uniform(gl, &program, "u_model")?,
            u_map: uniform(gl, &program, "u_map")?,
            u_color: uniform(gl, &program, "u_color")?,
            u_light: uniform(gl, &program, "u_light")?,
            program,
            vao,
        })
    }
}

impl AxesProgram {
    fn new(gl: &GL, length: f32) -> Result<Self, SceneError> {
        let program = link_program(gl, LINE_VS, LINE_FS)?;
        let l = length;
        #[rustfmt::skip]
        let lines = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0,   l, 0.0, 0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0,   l, 0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0,   l, 0.0, 0.0, 1.0,
        ];
        let vao = upload_vertices(gl, &lines, &[3, 3])?;
        Ok(Self {
            u_view_proj: uniform(gl, &program, "u_view_proj")?,
            program,
            vao,
        })
    }
}

/// Upload interleaved float vertices into a fresh VAO. `layout` lists the
/// component count of each attribute, bound to locations 0, 1, ...
fn upload_vertices(gl: &GL, data: &[f32], layout: &[i32]) -> Result<WebGlVertexArrayObject, SceneError> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| SceneError::Js("createVertexArray failed".to_owned()))?;
    gl.bind_vertex_array(Some(&vao));
    let buffer = gl
        .create_buffer()
        .ok_or_else(|| SceneError::Js("createBuffer failed".to_owned()))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.buffer_data_with_array_buffer_view(
        GL::ARRAY_BUFFER,
        &js_sys::Float32Array::from(data),
        GL::STATIC_DRAW,
    );

    let stride = layout.iter().sum::<i32>() * 4;
    let mut offset = 0;
    for (location, &components) in layout.iter().enumerate() {
        let location = location as u32;
        gl.enable_vertex_attrib_array(location);
        gl.vertex_attrib_pointer_with_i32(location, components, GL::FLOAT, false, stride, offset);
        offset += components * 4;
    }
    gl.bind_vertex_array(None);
    Ok(vao)
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, SceneError> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SceneError::Shader("createShader failed".to_owned()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        Err(SceneError::Shader(gl.get_shader_info_log(&shader).unwrap_or_default()))
    }
}

fn link_program(gl: &GL, vs: &str, fs: &str) -> Result<WebGlProgram, SceneError> {
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vs)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fs)?;
    let program = gl
        .create_program()
        .ok_or_else(|| SceneError::Shader("createProgram failed".to_owned()))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(SceneError::Shader(gl.get_program_info_log(&program).unwrap_or_default()))
    }
}

fn uniform(gl: &GL, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, SceneError> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| SceneError::Shader(format!("missing uniform {name}")))
}

/// Create the sprite texture with a transparent 1x1 placeholder and swap in
/// the image at `url` once it has loaded.
fn load_texture(gl: &GL, url: &str) -> Result<WebGlTexture, SceneError> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| SceneError::Js("createTexture failed".to_owned()))?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        1,
        1,
        0,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        Some(&[0_u8; 4][..]),
    )?;

    let image = HtmlImageElement::new()?;
    image.set_cross_origin(Some("anonymous"));

    let onload = {
        let gl = gl.clone();
        let texture = texture.clone();
        let image = image.clone();
        Closure::<dyn FnMut()>::new(move || {
            gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
            let uploaded = gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
                GL::TEXTURE_2D,
                0,
                GL::RGBA as i32,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                &image,
            );
            if let Err(e) = uploaded {
                log::error!("texture upload failed: {e:?}");
                return;
            }
            gl.generate_mipmap(GL::TEXTURE_2D);
            gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR_MIPMAP_LINEAR as i32);
            log::info!("smoke texture loaded ({}x{})", image.natural_width(), image.natural_height());
        })
    };
    let onerror = {
        let url = url.to_owned();
        Closure::<dyn FnMut()>::new(move || {
            log::warn!("could not load texture {url}; sprites stay invisible");
        })
    };
    image.set_onload(Some(onload.as_ref().unchecked_ref()));
    image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();
    image.set_src(url);

    Ok(texture)
}
