//! Render pipeline management system for wgpu
//!
//! Provides high-level pipeline creation and caching with structured
//! compile/link error reporting, plus shader hot-reloading in debug builds.

use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use wgpu::*;

use crate::gfx::scene::vertex::Vertex3D;

/// Shader program failures surfaced during pipeline construction
///
/// Both variants are fatal to the material being created: there is no
/// partial-shader fallback. The caller owns the retry decision, typically
/// by fixing the source and re-registering.
#[derive(Debug, Error)]
pub enum ShaderError {
    /// The WGSL source failed validation
    #[error("shader '{name}' failed to compile: {detail}")]
    Compile { name: String, detail: String },

    /// Pipeline creation failed, usually a mismatch between the declared
    /// bind group layouts or vertex attributes and what the source uses
    #[error("pipeline '{pipeline}' failed to link: {detail}")]
    Link { pipeline: String, detail: String },

    /// A pipeline config references a shader that was never loaded
    #[error("shader '{0}' not registered")]
    NotFound(String),
}

/// Configuration for creating a render pipeline
///
/// Defines all parameters needed to create a wgpu render pipeline,
/// including shaders, bind group layouts, and render state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_texture: Option<Texture>,
    pub multisample: MultisampleState,
    pub color_targets: Vec<Option<ColorTargetState>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "shader.wgsl".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: Some(Face::Back),
            depth_texture: None,
            multisample: MultisampleState::default(),
            color_targets: vec![Some(ColorTargetState {
                format: TextureFormat::Bgra8Unorm,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
        }
    }
}

impl PipelineConfig {
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    /// Sets the shader for this pipeline (builder pattern)
    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Sets all bind group layouts at once (builder pattern)
    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    /// Sets the depth texture for depth testing (builder pattern)
    pub fn with_depth_stencil(mut self, texture: Texture) -> Self {
        self.depth_texture = Some(texture);
        self
    }

    /// Sets color targets for this pipeline (builder pattern)
    pub fn with_color_targets(mut self, targets: Vec<Option<ColorTargetState>>) -> Self {
        self.color_targets = targets;
        self
    }
}

/// Manages render pipelines with caching and lazy creation
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    pipeline_configs: HashMap<String, PipelineConfig>,
    shader_modules: HashMap<String, ShaderModule>,
    shader_sources: HashMap<String, String>,
    pending_pipelines: Vec<String>,
}

impl PipelineManager {
    /// Creates a new pipeline manager
    ///
    /// # Arguments
    /// * `device` - Shared wgpu device for creating resources
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            pipeline_configs: HashMap::new(),
            shader_modules: HashMap::new(),
            shader_sources: HashMap::new(),
            pending_pipelines: Vec::new(),
        }
    }

    /// Registers a pipeline configuration without creating it
    ///
    /// Pipelines are created lazily when first requested via `get_pipeline()`,
    /// or eagerly via `create_all_pipelines()`.
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) {
        self.pipeline_configs.insert(name.to_string(), config);
        self.pending_pipelines.push(name.to_string());
    }

    /// Loads and validates a shader module
    ///
    /// Validation runs inside a wgpu error scope so a broken source is
    /// reported as [`ShaderError::Compile`] instead of an uncaptured device
    /// error. Stores both the compiled module and source for hot-reloading.
    pub fn load_shader(&mut self, name: &str, source: &str) -> Result<(), ShaderError> {
        self.device.push_error_scope(ErrorFilter::Validation);
        let shader_module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(ShaderError::Compile {
                name: name.to_string(),
                detail: error.to_string(),
            });
        }

        self.shader_modules.insert(name.to_string(), shader_module);
        self.shader_sources
            .insert(name.to_string(), source.to_string());
        Ok(())
    }

    /// Gets or creates a pipeline (lazy loading)
    ///
    /// Returns an existing pipeline if available, otherwise creates it
    /// from the registered configuration. Creation failures are logged and
    /// reported as `None`; use `create_all_pipelines()` for the structured
    /// error.
    pub fn get_pipeline(&mut self, name: &str) -> Option<&RenderPipeline> {
        if self.pipelines.contains_key(name) {
            return self.pipelines.get(name);
        }

        if let Some(config) = self.pipeline_configs.get(name).cloned() {
            match self.create_pipeline_from_config(name, &config) {
                Ok(pipeline) => {
                    self.pipelines.insert(name.to_string(), pipeline);
                    self.pending_pipelines.retain(|n| n != name);
                    return self.pipelines.get(name);
                }
                Err(e) => {
                    log::error!("failed to create pipeline '{}': {}", name, e);
                    return None;
                }
            }
        }

        None
    }

    /// Creates all pending pipelines immediately
    ///
    /// Useful for validating configurations before the first frame, so that
    /// link failures abort material creation instead of the first draw.
    pub fn create_all_pipelines(&mut self) -> Result<(), Vec<ShaderError>> {
        let mut errors = Vec::new();
        let pending = self.pending_pipelines.clone();

        for name in pending {
            if let Some(config) = self.pipeline_configs.get(&name).cloned() {
                match self.create_pipeline_from_config(&name, &config) {
                    Ok(pipeline) => {
                        self.pipelines.insert(name.clone(), pipeline);
                        self.pending_pipelines.retain(|n| n != &name);
                    }
                    Err(e) => {
                        errors.push(e);
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Hot-reloads a shader and recreates affected pipelines
    ///
    /// Only available in debug builds for development workflow.
    ///
    /// # Returns
    /// List of pipeline names that were recreated
    #[cfg(debug_assertions)]
    pub fn hot_reload_shader(
        &mut self,
        shader_name: &str,
        new_source: &str,
    ) -> Result<Vec<String>, ShaderError> {
        self.load_shader(shader_name, new_source)?;

        let mut affected_pipelines = Vec::new();
        for (pipeline_name, config) in &self.pipeline_configs {
            if config.shader == shader_name {
                affected_pipelines.push(pipeline_name.clone());
            }
        }

        for pipeline_name in &affected_pipelines {
            if let Some(config) = self.pipeline_configs.get(pipeline_name).cloned() {
                match self.create_pipeline_from_config(pipeline_name, &config) {
                    Ok(pipeline) => {
                        self.pipelines.insert(pipeline_name.clone(), pipeline);
                    }
                    Err(e) => {
                        log::error!(
                            "failed to recreate pipeline '{}' after shader reload: {}",
                            pipeline_name,
                            e
                        );
                    }
                }
            }
        }

        Ok(affected_pipelines)
    }

    /// Creates a render pipeline from configuration
    fn create_pipeline_from_config(
        &self,
        name: &str,
        config: &PipelineConfig,
    ) -> Result<RenderPipeline, ShaderError> {
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| ShaderError::NotFound(config.shader.clone()))?;

        let bind_group_layout_refs: Vec<&BindGroupLayout> =
            config.bind_group_layouts.iter().collect();

        // Layout and pipeline creation run in one error scope; any
        // attribute or binding mismatch against the shader interface
        // surfaces here as a link failure.
        self.device.push_error_scope(ErrorFilter::Validation);

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

        let depth_stencil = config
            .depth_texture
            .as_ref()
            .map(|texture| DepthStencilState {
                format: texture.format(),
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            });

        let pipeline = self
            .device
            .create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &config.color_targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: config.multisample,
                multiview: None,
                cache: None,
            });

        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            return Err(ShaderError::Link {
                pipeline: name.to_string(),
                detail: error.to_string(),
            });
        }

        Ok(pipeline)
    }

    /// Returns the source text a shader was last loaded from
    pub fn shader_source(&self, name: &str) -> Option<&str> {
        self.shader_sources.get(name).map(String::as_str)
    }

    /// Checks if a pipeline is registered
    ///
    /// # Returns
    /// True if pipeline config exists (created or pending)
    pub fn has_pipeline(&self, name: &str) -> bool {
        self.pipeline_configs.contains_key(name)
    }
}
