use std::fmt::Write as _;

use anyhow::{anyhow, bail, Context, Result};
use codec::{decode_packet, EntityKind, Packet, ProtocolVersion};
use serde::Serialize;
use uuid::Uuid;
use wire::{decode_frame, ByteReader, Limits};

/// One decoded packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub protocol: ProtocolVersion,
    pub packet_id: i32,
    pub frame_bytes: usize,
    #[serde(flatten)]
    pub packet: PacketSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PacketSummary {
    SpawnMob {
        entity_id: i32,
        #[serde(skip_serializing_if = "Option::is_none")]
        uuid: Option<Uuid>,
        mob: EntityKind,
        position: [f64; 3],
        yaw: f32,
        pitch: f32,
        invisible: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        target: Option<i32>,
    },
    EntityTeleport {
        entity_id: i32,
        position: [f64; 3],
        yaw: f32,
        pitch: f32,
        on_ground: bool,
    },
    DestroyEntities {
        entity_ids: Vec<i32>,
    },
}

impl PacketSummary {
    fn from_packet(packet: &Packet) -> Self {
        match packet {
            Packet::SpawnMob(spawn) => Self::SpawnMob {
                entity_id: spawn.entity_id.raw(),
                uuid: (!spawn.uuid.is_nil()).then_some(spawn.uuid),
                mob: spawn.kind,
                position: spawn.placement.position.to_array(),
                yaw: spawn.placement.yaw,
                pitch: spawn.placement.pitch,
                invisible: spawn.attributes.invisible,
                target: spawn.attributes.target.map(codec::EntityId::raw),
            },
            Packet::EntityTeleport(teleport) => Self::EntityTeleport {
                entity_id: teleport.entity_id.raw(),
                position: teleport.placement.position.to_array(),
                yaw: teleport.placement.yaw,
                pitch: teleport.placement.pitch,
                on_ground: teleport.on_ground,
            },
            Packet::DestroyEntities(destroy) => Self::DestroyEntities {
                entity_ids: destroy.entity_ids.iter().map(|id| id.raw()).collect(),
            },
        }
    }
}

/// Decodes a single framed packet.
pub fn inspect_packet(
    bytes: &[u8],
    version: ProtocolVersion,
    limits: &Limits,
) -> Result<InspectReport> {
    let frame = decode_frame(bytes, limits).context("decode frame")?;
    let packet = decode_packet(bytes, version, limits)
        .with_context(|| format!("decode packet 0x{:02X}", frame.packet_id))?;
    Ok(InspectReport {
        protocol: version,
        packet_id: frame.packet_id,
        frame_bytes: bytes.len(),
        packet: PacketSummary::from_packet(&packet),
    })
}

/// Decodes every packet in a capture of back-to-back frames.
pub fn inspect_capture(
    bytes: &[u8],
    version: ProtocolVersion,
    limits: &Limits,
) -> Result<Vec<InspectReport>> {
    split_frames(bytes)?
        .into_iter()
        .enumerate()
        .map(|(index, frame)| {
            inspect_packet(frame, version, limits).with_context(|| format!("packet {index}"))
        })
        .collect()
}

/// Splits back-to-back frames on their length prefixes.
pub fn split_frames(bytes: &[u8]) -> Result<Vec<&[u8]>> {
    let mut frames = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let rest = &bytes[offset..];
        let mut reader = ByteReader::new(rest);
        let len = reader
            .read_var_len()
            .with_context(|| format!("frame length at offset {offset}"))?;
        let end = reader
            .position()
            .checked_add(len)
            .filter(|end| *end <= rest.len())
            .ok_or_else(|| anyhow!("frame at offset {offset} is truncated"))?;
        frames.push(&rest[..end]);
        offset += end;
    }
    Ok(frames)
}

/// Parses hex text. Whitespace is ignored and an optional `0x` prefix is allowed.
pub fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: String = text.split_whitespace().collect();
    let digits = digits.strip_prefix("0x").unwrap_or(&digits);
    if !digits.is_ascii() {
        bail!("hex input contains non-ASCII characters");
    }
    if digits.len() % 2 != 0 {
        bail!("hex input has an odd number of digits");
    }
    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .with_context(|| format!("invalid hex byte at digit {i}"))
        })
        .collect()
}

pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "[{} 0x{:02X}, {} bytes] ",
        report.protocol, report.packet_id, report.frame_bytes
    );
    match &report.packet {
        PacketSummary::SpawnMob {
            entity_id,
            mob,
            position,
            yaw,
            pitch,
            invisible,
            target,
            ..
        } => {
            let _ = write!(
                out,
                "spawn {mob:?} #{entity_id} at ({:.3}, {:.3}, {:.3}) yaw {yaw:.1} pitch {pitch:.1}",
                position[0], position[1], position[2]
            );
            if *invisible {
                out.push_str(" invisible");
            }
            if let Some(target) = target {
                let _ = write!(out, " target #{target}");
            }
        }
        PacketSummary::EntityTeleport {
            entity_id,
            position,
            yaw,
            pitch,
            ..
        } => {
            let _ = write!(
                out,
                "teleport #{entity_id} to ({:.3}, {:.3}, {:.3}) yaw {yaw:.1} pitch {pitch:.1}",
                position[0], position[1], position[2]
            );
        }
        PacketSummary::DestroyEntities { entity_ids } => {
            let ids: Vec<String> = entity_ids.iter().map(|id| format!("#{id}")).collect();
            let _ = write!(out, "destroy {}", ids.join(", "));
        }
    }
    out
}
