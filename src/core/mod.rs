// ─── makemcserver Core ───
// Provisioning backend for a ready-to-run Minecraft server.
//
// Architecture:
//   core/
//     config/     — YAML presets, default mods, Java runtime table
//     catalog/    — Mojang, Fabric, Paper, Forge/NeoForge maven, Modrinth
//     downloader/ — Single-file downloads with SHA-1 / SHA-256 validation
//     loaders/    — Vanilla, Fabric, Paper, Forge, NeoForge
//     mods/       — Modrinth mod selection + download
//     server/     — server.properties, start script, EULA marker
//     java/       — Runtime path lookup by required major version
//     pipeline    — Sequences one provisioning run

pub mod catalog;
pub mod config;
pub mod downloader;
pub mod error;
pub mod events;
pub mod http;
pub mod java;
pub mod loaders;
pub mod mods;
pub mod pipeline;
pub mod server;
