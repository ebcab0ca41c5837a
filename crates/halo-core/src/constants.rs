use glam::Vec3;

// Fixed engine configuration. Nothing here is mutable at runtime.

// Camera
pub const FOV_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
pub const CAMERA_Z: f32 = 6.0; // eye sits on +Z looking at the origin
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 0.0, CAMERA_Z);

// Surface
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0]; // transparent, the page shows through
pub const PIXEL_RATIO_CLAMP: f32 = 2.0;
pub const RESIZE_DEBOUNCE_MS: f64 = 80.0;

// Ring cluster
pub const RING_COUNT: usize = 9;
pub const RING_LAYOUT_RADIUS: f32 = 1.5; // circle radius for ring 0
pub const RING_LAYOUT_GROWTH: f32 = 0.08; // added per ring index
pub const RING_DEPTH_STEP: f32 = -0.12; // rings recede slightly along -Z
pub const RING_BASE_RADIUS: f32 = 0.42;
pub const RING_BASE_RADIUS_STEP: f32 = 0.05;
pub const RING_TUBE_RADIUS: f32 = 0.035;
pub const RING_TUBE_RADIUS_STEP: f32 = 0.006;
pub const RING_TILT: f32 = 0.6; // rotation.x magnitude, sign alternates with index parity
pub const RING_RADIAL_SEGMENTS: u32 = 16;
pub const RING_TUBULAR_SEGMENTS: u32 = 96;

// Ring palette (HSL, hue in turns)
pub const RING_HUE_START: f32 = 0.55;
pub const RING_HUE_ARC: f32 = 0.25;
pub const RING_SATURATION: f32 = 0.72;
pub const RING_LIGHTNESS: f32 = 0.56;
pub const RING_METALNESS: f32 = 0.8;
pub const RING_ROUGHNESS: f32 = 0.25;
pub const RING_EMISSIVE_SCALE: f32 = 0.08;

// Particle field
pub const PARTICLE_COUNT: usize = 420;
pub const PARTICLE_BOX_MIN: Vec3 = Vec3::new(-12.0, -6.0, -12.0);
pub const PARTICLE_BOX_MAX: Vec3 = Vec3::new(12.0, 6.0, 2.0);
pub const PARTICLE_SIZE_MIN: f32 = 0.6;
pub const PARTICLE_SIZE_MAX: f32 = 2.2;
pub const PARTICLE_TIME_SCALE: f32 = 0.0006; // elapsed ms -> shader time
pub const PARTICLE_POINT_SCALE: f32 = 26.0; // k in size * pixelRatio * k / -viewZ
pub const PARTICLE_FADE_RADIUS: f32 = 18.0; // world distance where alpha reaches zero
pub const PARTICLE_ALPHA_MAX: f32 = 0.7;
pub const PARTICLE_COLOR: [f32; 3] = [0.72, 0.86, 1.0];

// Root drift
pub const DRIFT_YAW_RATE: f32 = 0.0005;
pub const DRIFT_YAW_AMPLITUDE: f32 = 0.12;
pub const DRIFT_BOB_RATE: f32 = 0.0004;
pub const DRIFT_BOB_AMPLITUDE: f32 = 0.15;

// Interaction
pub const PROXIMITY_FALLOFF: f32 = 0.26; // t = 1 - d * falloff
pub const PROXIMITY_SCALE_MIN: f32 = 0.98;
pub const PROXIMITY_SCALE_MAX: f32 = 1.14;
pub const RING_SPIN_Z_BASE: f32 = 0.002;
pub const RING_SPIN_Z_STEP: f32 = 0.002; // multiplied by index mod 3
pub const RING_SPIN_Y: f32 = 0.001;
pub const RAY_PARALLEL_EPSILON: f32 = 1e-6;

// Lights
pub const AMBIENT_COLOR: [f32; 3] = [0.55, 0.62, 0.85];
pub const AMBIENT_INTENSITY: f32 = 0.35;
pub const DIRECTIONAL_COLOR: [f32; 3] = [1.0, 0.97, 0.92];
pub const DIRECTIONAL_INTENSITY: f32 = 0.9;
pub const DIRECTIONAL_DIRECTION: Vec3 = Vec3::new(0.4, 0.8, 0.6); // towards the light
pub const ORBIT_LIGHT_COLOR: [f32; 3] = [0.49, 0.83, 1.0];
pub const ORBIT_LIGHT_INTENSITY: f32 = 1.6;
pub const ORBIT_LIGHT_RANGE: f32 = 12.0;
pub const ORBIT_LIGHT_RADIUS: f32 = 3.2;
pub const ORBIT_LIGHT_HEIGHT: f32 = 1.4;
pub const ORBIT_LIGHT_RATE_X: f32 = 0.0007;
pub const ORBIT_LIGHT_RATE_Z: f32 = 0.00045;

// Furniture
pub const ENVIRONMENT_RADIUS: f32 = 60.0;
pub const ENVIRONMENT_TINT: [f32; 3] = [0.04, 0.05, 0.11];
pub const GROUND_SIZE: f32 = 80.0;
pub const GROUND_Y: f32 = -3.2;
pub const GROUND_COLOR: [f32; 3] = [0.05, 0.06, 0.1];

// Telemetry
pub const PERF_WINDOW_MS: f64 = 1000.0;
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
