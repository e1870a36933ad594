// SPDX-License-Identifier: Apache-2.0
//! The `go` target's embedded runtime template (§4.8), mirroring
//! `targets::rust::runtime_template` field for field so both targets honor
//! the identical wire format.

/// The `go` backend's runtime support file, one per generated package.
pub const GO_RUNTIME_TEMPLATE: &str = r#"// Generated by sdp-codegen. Do not edit by hand.
package sdpgen

import (
	"encoding/binary"
	"errors"
	"fmt"
	"math"
	"unicode/utf8"
)

const MaxSerializedSize uint64 = 134217728
const MaxArrayElements uint32 = 1000000
const MaxTotalElements uint32 = 10000000
const MaxNestingDepth uint32 = 20

var MessageMagic = [3]byte{0x53, 0x44, 0x50}
const MessageVersion byte = 0x32
const MessageHeaderSize int = 10

// DecodeContext tracks per-call decode state: running offset, cumulative
// array element count, and nesting depth, checked against the limits
// above on every read.
type DecodeContext struct {
	Offset              int
	CumulativeElements  uint32
	Depth               uint32
}

// UnexpectedEOFError reports fewer bytes remaining than a read needs.
type UnexpectedEOFError struct {
	Expected, Available int
}

func (e *UnexpectedEOFError) Error() string {
	return fmt.Sprintf("unexpected end of input: needed %d bytes, %d available", e.Expected, e.Available)
}

// InvalidUTF8Error reports a str payload that was not valid UTF-8.
type InvalidUTF8Error struct{ Offset int }

func (e *InvalidUTF8Error) Error() string { return fmt.Sprintf("invalid utf-8 at offset %d", e.Offset) }

// InvalidBoolError reports a bool byte that was neither 0 nor 1.
type InvalidBoolError struct {
	Byte   byte
	Offset int
}

func (e *InvalidBoolError) Error() string {
	return fmt.Sprintf("invalid bool byte 0x%02x at offset %d", e.Byte, e.Offset)
}

// InvalidPresenceError reports a presence byte that was neither 0 nor 1.
type InvalidPresenceError struct {
	Byte   byte
	Offset int
}

func (e *InvalidPresenceError) Error() string {
	return fmt.Sprintf("invalid presence byte 0x%02x at offset %d", e.Byte, e.Offset)
}

// ArrayTooLargeError reports an array length prefix above MaxArrayElements.
type ArrayTooLargeError struct{ Count, Max uint32 }

func (e *ArrayTooLargeError) Error() string {
	return fmt.Sprintf("array element count %d exceeds limit %d", e.Count, e.Max)
}

// TooManyElementsError reports a cumulative element count above MaxTotalElements.
type TooManyElementsError struct{ Cumulative, Max uint32 }

func (e *TooManyElementsError) Error() string {
	return fmt.Sprintf("cumulative element count %d exceeds limit %d", e.Cumulative, e.Max)
}

// DataTooLargeError reports an input above MaxSerializedSize.
type DataTooLargeError struct {
	Len int
	Max uint64
}

func (e *DataTooLargeError) Error() string {
	return fmt.Sprintf("input length %d exceeds limit %d", e.Len, e.Max)
}

// NestingTooDeepError reports nesting beyond MaxNestingDepth.
type NestingTooDeepError struct{ Depth, Max uint32 }

func (e *NestingTooDeepError) Error() string {
	return fmt.Sprintf("nesting depth %d exceeds limit %d", e.Depth, e.Max)
}

// MessageTooShortError reports fewer than MessageHeaderSize bytes.
var ErrMessageTooShort = errors.New("message shorter than the 10-byte header")

// ErrInvalidMagic reports a header whose magic bytes did not match.
var ErrInvalidMagic = errors.New("invalid message magic")

// InvalidVersionError reports a header whose version byte did not match.
type InvalidVersionError struct{ Byte byte }

func (e *InvalidVersionError) Error() string {
	return fmt.Sprintf("invalid message version byte 0x%02x", e.Byte)
}

// UnknownMessageTypeError reports a header whose type id matched no declaration.
type UnknownMessageTypeError struct{ ID uint16 }

func (e *UnknownMessageTypeError) Error() string {
	return fmt.Sprintf("unknown message type id %d", e.ID)
}

// PayloadSizeMismatchError reports a declared payload length that does
// not match the bytes actually remaining.
type PayloadSizeMismatchError struct {
	Declared uint32
	Actual   int
}

func (e *PayloadSizeMismatchError) Error() string {
	return fmt.Sprintf("declared payload size %d does not match %d remaining bytes", e.Declared, e.Actual)
}

func (ctx *DecodeContext) enterNesting() error {
	if ctx.Depth >= MaxNestingDepth {
		return &NestingTooDeepError{Depth: ctx.Depth + 1, Max: MaxNestingDepth}
	}
	ctx.Depth++
	return nil
}

func (ctx *DecodeContext) exitNesting() {
	if ctx.Depth > 0 {
		ctx.Depth--
	}
}

func (ctx *DecodeContext) addElements(count uint32) error {
	total := ctx.CumulativeElements + count
	if total < ctx.CumulativeElements || total > MaxTotalElements {
		return &TooManyElementsError{Cumulative: total, Max: MaxTotalElements}
	}
	ctx.CumulativeElements = total
	return nil
}

func checkInputSize(bytes []byte) error {
	if uint64(len(bytes)) > MaxSerializedSize {
		return &DataTooLargeError{Len: len(bytes), Max: MaxSerializedSize}
	}
	return nil
}

func require(bytes []byte, offset, length int) error {
	if offset+length > len(bytes) {
		return &UnexpectedEOFError{Expected: length, Available: len(bytes) - offset}
	}
	return nil
}

func writeU8(buf *[]byte, value uint8)  { *buf = append(*buf, value) }
func writeI8(buf *[]byte, value int8)   { *buf = append(*buf, byte(value)) }
func writeBool(buf *[]byte, value bool) {
	if value {
		*buf = append(*buf, 1)
	} else {
		*buf = append(*buf, 0)
	}
}

func readU8(bytes []byte, ctx *DecodeContext) (uint8, error) {
	if err := require(bytes, ctx.Offset, 1); err != nil {
		return 0, err
	}
	v := bytes[ctx.Offset]
	ctx.Offset++
	return v, nil
}

func readI8(bytes []byte, ctx *DecodeContext) (int8, error) {
	v, err := readU8(bytes, ctx)
	return int8(v), err
}

func readBool(bytes []byte, ctx *DecodeContext) (bool, error) {
	offset := ctx.Offset
	v, err := readU8(bytes, ctx)
	if err != nil {
		return false, err
	}
	switch v {
	case 0:
		return false, nil
	case 1:
		return true, nil
	default:
		return false, &InvalidBoolError{Byte: v, Offset: offset}
	}
}

func writeU16(buf *[]byte, value uint16) {
	var raw [2]byte
	binary.LittleEndian.PutUint16(raw[:], value)
	*buf = append(*buf, raw[:]...)
}

func readU16(bytes []byte, ctx *DecodeContext) (uint16, error) {
	if err := require(bytes, ctx.Offset, 2); err != nil {
		return 0, err
	}
	v := binary.LittleEndian.Uint16(bytes[ctx.Offset:])
	ctx.Offset += 2
	return v, nil
}

func writeI16(buf *[]byte, value int16) { writeU16(buf, uint16(value)) }
func readI16(bytes []byte, ctx *DecodeContext) (int16, error) {
	v, err := readU16(bytes, ctx)
	return int16(v), err
}

func writeU32(buf *[]byte, value uint32) {
	var raw [4]byte
	binary.LittleEndian.PutUint32(raw[:], value)
	*buf = append(*buf, raw[:]...)
}

func readU32(bytes []byte, ctx *DecodeContext) (uint32, error) {
	if err := require(bytes, ctx.Offset, 4); err != nil {
		return 0, err
	}
	v := binary.LittleEndian.Uint32(bytes[ctx.Offset:])
	ctx.Offset += 4
	return v, nil
}

func writeI32(buf *[]byte, value int32) { writeU32(buf, uint32(value)) }
func readI32(bytes []byte, ctx *DecodeContext) (int32, error) {
	v, err := readU32(bytes, ctx)
	return int32(v), err
}

func writeF32(buf *[]byte, value float32) { writeU32(buf, math.Float32bits(value)) }
func readF32(bytes []byte, ctx *DecodeContext) (float32, error) {
	v, err := readU32(bytes, ctx)
	return math.Float32frombits(v), err
}

func writeU64(buf *[]byte, value uint64) {
	var raw [8]byte
	binary.LittleEndian.PutUint64(raw[:], value)
	*buf = append(*buf, raw[:]...)
}

func readU64(bytes []byte, ctx *DecodeContext) (uint64, error) {
	if err := require(bytes, ctx.Offset, 8); err != nil {
		return 0, err
	}
	v := binary.LittleEndian.Uint64(bytes[ctx.Offset:])
	ctx.Offset += 8
	return v, nil
}

func writeI64(buf *[]byte, value int64) { writeU64(buf, uint64(value)) }
func readI64(bytes []byte, ctx *DecodeContext) (int64, error) {
	v, err := readU64(bytes, ctx)
	return int64(v), err
}

func writeF64(buf *[]byte, value float64) { writeU64(buf, math.Float64bits(value)) }
func readF64(bytes []byte, ctx *DecodeContext) (float64, error) {
	v, err := readU64(bytes, ctx)
	return math.Float64frombits(v), err
}

func writeLenPrefixed(buf *[]byte, bytes []byte) {
	writeU32(buf, uint32(len(bytes)))
	*buf = append(*buf, bytes...)
}

func readLenPrefixed(bytes []byte, ctx *DecodeContext) ([]byte, error) {
	length, err := readU32(bytes, ctx)
	if err != nil {
		return nil, err
	}
	if err := require(bytes, ctx.Offset, int(length)); err != nil {
		return nil, err
	}
	start := ctx.Offset
	ctx.Offset += int(length)
	return bytes[start:ctx.Offset], nil
}

func writeStr(buf *[]byte, value string) { writeLenPrefixed(buf, []byte(value)) }

func readStr(bytes []byte, ctx *DecodeContext) (string, error) {
	offset := ctx.Offset
	raw, err := readLenPrefixed(bytes, ctx)
	if err != nil {
		return "", err
	}
	if !utf8.Valid(raw) {
		return "", &InvalidUTF8Error{Offset: offset}
	}
	return string(raw), nil
}

func writeBytes(buf *[]byte, value []byte) { writeLenPrefixed(buf, value) }

func readBytes(bytes []byte, ctx *DecodeContext) ([]byte, error) {
	return readLenPrefixed(bytes, ctx)
}

func writeArrayLen(buf *[]byte, count uint32) { writeU32(buf, count) }

func readArrayLen(bytes []byte, ctx *DecodeContext) (uint32, error) {
	count, err := readU32(bytes, ctx)
	if err != nil {
		return 0, err
	}
	if count > MaxArrayElements {
		return 0, &ArrayTooLargeError{Count: count, Max: MaxArrayElements}
	}
	if err := ctx.addElements(count); err != nil {
		return 0, err
	}
	return count, nil
}

func writePresence(buf *[]byte, present bool) {
	if present {
		*buf = append(*buf, 1)
	} else {
		*buf = append(*buf, 0)
	}
}

func readPresence(bytes []byte, ctx *DecodeContext) (bool, error) {
	offset := ctx.Offset
	v, err := readU8(bytes, ctx)
	if err != nil {
		return false, err
	}
	switch v {
	case 0:
		return false, nil
	case 1:
		return true, nil
	default:
		return false, &InvalidPresenceError{Byte: v, Offset: offset}
	}
}

func writeMessageHeader(buf *[]byte, typeID uint16, payloadLen uint32) {
	*buf = append(*buf, MessageMagic[:]...)
	*buf = append(*buf, MessageVersion)
	writeU16(buf, typeID)
	writeU32(buf, payloadLen)
}

// MessageHeader holds the parsed fields of a validated message header.
type MessageHeader struct {
	TypeID     uint16
	PayloadLen uint32
}

func readMessageHeader(bytes []byte) (MessageHeader, error) {
	var header MessageHeader
	if len(bytes) < MessageHeaderSize {
		return header, ErrMessageTooShort
	}
	if bytes[0] != MessageMagic[0] || bytes[1] != MessageMagic[1] || bytes[2] != MessageMagic[2] {
		return header, ErrInvalidMagic
	}
	if bytes[3] != MessageVersion {
		return header, &InvalidVersionError{Byte: bytes[3]}
	}
	header.TypeID = binary.LittleEndian.Uint16(bytes[4:6])
	header.PayloadLen = binary.LittleEndian.Uint32(bytes[6:10])
	actual := len(bytes) - MessageHeaderSize
	if int(header.PayloadLen) != actual {
		return header, &PayloadSizeMismatchError{Declared: header.PayloadLen, Actual: actual}
	}
	return header, nil
}
"#;
